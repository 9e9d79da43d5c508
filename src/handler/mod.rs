pub mod error;
pub mod stock;
