use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::app::AppState;
use crate::handler::stock::{create_stock, delete_stock, get_stock, list_stocks, update_stock};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stock/", get(list_stocks))
        .route("/stock/:id", get(get_stock).put(update_stock))
        .route("/newstock", post(create_stock))
        .route("/deletestock/:id", delete(delete_stock))
}
