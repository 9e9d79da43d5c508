use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct StockPayload {
    pub name: String,
    pub price: f64,
    pub company: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StockResponse {
    pub stockid: i64,
    pub name: String,
    pub price: f64,
    pub company: String,
}

/// 写操作的统一返回体：`{id, message}`
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: i64,
    pub message: String,
}
