//! File-based implementations of the repository traits

mod file_warehouse_repo;

pub use file_warehouse_repo::FileWarehouseRepository;
