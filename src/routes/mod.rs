use axum::Router;

use crate::app::AppState;
use crate::handler::error::AppError;

mod root;
mod stock;

pub fn build_routes() -> Router<AppState> {
    Router::new()
        // 根路径与健康检查
        .merge(root::router())
        // 业务 API 统一挂在 /api/v1 前缀下
        .nest("/api/v1", stock::router())
        .fallback(fallback)
}

async fn fallback() -> AppError {
    AppError::NotFound
}
