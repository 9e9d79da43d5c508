use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::api_models::stock::{MessageResponse, StockPayload, StockResponse};
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::models::{NewStock, Stock};
use crate::repositories::stock;

impl From<Stock> for StockResponse {
    fn from(item: Stock) -> Self {
        Self {
            stockid: item.stockid,
            name: item.name,
            price: item.price,
            company: item.company,
        }
    }
}

impl From<StockPayload> for NewStock {
    fn from(payload: StockPayload) -> Self {
        Self {
            name: payload.name,
            price: payload.price,
            company: payload.company,
        }
    }
}

pub async fn create_stock(
    State(state): State<AppState>,
    payload: Result<Json<StockPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(payload) = payload?;
    let new_stock = NewStock::from(payload);
    let new_id = state
        .run_db(move |conn| stock::create(conn, &new_stock))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            id: new_id,
            message: "stock created successfully.".to_string(),
        }),
    ))
}

pub async fn get_stock(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<StockResponse>, AppError> {
    let Path(id) = id?;
    let found = state
        .run_db(move |conn| stock::find_by_id(conn, id))
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(found.into()))
}

pub async fn list_stocks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StockResponse>>, AppError> {
    let items = state.run_db(stock::list_all).await?;
    let response: Vec<StockResponse> = items.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// 整行替换；目标不存在时返回影响行数 0 而不是 404
pub async fn update_stock(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<StockPayload>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let update_data = NewStock::from(payload);
    let affected = state
        .run_db(move |conn| stock::update_by_id(conn, id, &update_data))
        .await?;

    Ok(Json(MessageResponse {
        id,
        message: format!(
            "Stock updated successfully. Total rows/records affected: {}",
            affected
        ),
    }))
}

pub async fn delete_stock(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    let affected = state
        .run_db(move |conn| stock::delete_by_id(conn, id))
        .await?;

    Ok(Json(MessageResponse {
        id,
        message: format!(
            "Stock deleted successfully. Total rows/records {}",
            affected
        ),
    }))
}
