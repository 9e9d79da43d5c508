pub mod stock;

pub use stock::{NewStock, Stock};
