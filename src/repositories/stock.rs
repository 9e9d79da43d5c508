use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::models::{NewStock, Stock};
use crate::schema::stocks::dsl::*;

pub fn create(conn: &mut PgConnection, new_stock: &NewStock) -> Result<i64, diesel::result::Error> {
    let inserted: i64 = diesel::insert_into(stocks)
        .values(new_stock)
        .returning(stockid)
        .get_result(conn)?;
    tracing::info!("Inserted a single record {}", inserted);
    Ok(inserted)
}

pub fn find_by_id(conn: &mut PgConnection, stock_id: i64) -> Result<Option<Stock>, diesel::result::Error> {
    stocks
        .find(stock_id)
        .select(Stock::as_select())
        .first(conn)
        .optional()
}

pub fn list_all(conn: &mut PgConnection) -> Result<Vec<Stock>, diesel::result::Error> {
    stocks
        .order(stockid.asc())
        .select(Stock::as_select())
        .load(conn)
}

pub fn update_by_id(
    conn: &mut PgConnection,
    stock_id: i64,
    update_data: &NewStock,
) -> Result<usize, diesel::result::Error> {
    let affected = diesel::update(stocks.find(stock_id))
        .set(update_data)
        .execute(conn)?;
    tracing::info!("Total rows/records affected: {}", affected);
    Ok(affected)
}

pub fn delete_by_id(conn: &mut PgConnection, stock_id: i64) -> Result<usize, diesel::result::Error> {
    let affected = diesel::delete(stocks.find(stock_id)).execute(conn)?;
    tracing::info!("Total rows/records affected: {}", affected);
    Ok(affected)
}
