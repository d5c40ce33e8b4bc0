//! CLI definition using clap

use clap::{Args, Parser, Subcommand};
use shipwise_domain::model::ShippingMode;
use shipwise_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shipwise")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Chargeable weight calculation and courier rate selection")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Parcel weight and box dimensions
#[derive(Args, Debug, Clone)]
pub struct ParcelArgs {
    /// Actual weight in kg
    #[arg(long)]
    pub weight: f64,

    /// Length in cm
    #[arg(long)]
    pub length: f64,

    /// Width in cm
    #[arg(long)]
    pub width: f64,

    /// Height in cm
    #[arg(long)]
    pub height: f64,
}

/// Origin and destination of a shipment
#[derive(Args, Debug, Clone)]
pub struct RouteArgs {
    /// Origin pincode
    #[arg(long, conflicts_with = "warehouse")]
    pub from: Option<String>,

    /// Pickup warehouse id (defaults to the warehouse marked default)
    #[arg(long)]
    pub warehouse: Option<String>,

    /// Destination pincode
    #[arg(long)]
    pub to: String,

    /// Cash on delivery with this collectable amount
    #[arg(long)]
    pub cod: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the chargeable weight of one parcel
    Weight {
        #[command(flatten)]
        parcel: ParcelArgs,
    },

    /// Chargeable weights for every parcel in a CSV file
    Weights {
        /// CSV with reference,weight_kg,length_cm,width_cm,height_cm
        csv: PathBuf,
    },

    /// Fetch courier quotes for a shipment
    Rates {
        #[command(flatten)]
        route: RouteArgs,

        #[command(flatten)]
        parcel: ParcelArgs,
    },

    /// Fetch quotes, pick one, and hand it to the order service
    Book {
        #[command(flatten)]
        route: RouteArgs,

        #[command(flatten)]
        parcel: ParcelArgs,

        /// Courier name as shown by `rates`
        #[arg(long)]
        courier: String,

        /// Shipping mode of the chosen quote (surface, air)
        #[arg(long, value_parser = parse_mode, default_value = "surface")]
        mode: ShippingMode,

        /// Return-to-origin warehouse id
        #[arg(long)]
        rto_warehouse: Option<String>,
    },

    /// List configured pickup warehouses
    Warehouses,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set rating/order service base URL
        #[arg(long)]
        set_api_url: Option<String>,

        /// Set request timeout in seconds
        #[arg(long)]
        set_timeout: Option<u64>,

        /// Include return-to-origin charges in quotes
        #[arg(long)]
        set_include_rto: Option<bool>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set warehouse directory file
        #[arg(long)]
        set_warehouses: Option<PathBuf>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

fn parse_mode(raw: &str) -> Result<ShippingMode, String> {
    raw.parse()
}
