//! Command-line front end for shipwise: argument definitions, command
//! handlers, and output rendering

pub mod cli;
pub mod commands;
pub mod output;
