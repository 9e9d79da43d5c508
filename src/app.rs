use std::time::Duration;

use axum::Router;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use crate::handler::error::AppError;
use crate::routes;
use crate::utils::config::DatabaseConfig;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
    pub db_timeout: Duration,
}

impl AppState {
    /// 在阻塞线程池中取连接并执行一次数据库操作，受请求级超时约束。
    /// 连接在闭包返回时归还连接池（无论成功或失败）。
    pub async fn run_db<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, diesel::result::Error> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.db_pool.clone();
        let task = tokio::task::spawn_blocking(move || -> Result<T, AppError> {
            let mut conn = pool.get()?;
            Ok(op(&mut *conn)?)
        });

        match tokio::time::timeout(self.db_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => {
                tracing::error!("Database task failed: {}", join_err);
                Err(AppError::InternalServerError)
            }
            Err(_) => {
                tracing::error!("Database call timed out after {:?}", self.db_timeout);
                Err(AppError::ServiceUnavailable)
            }
        }
    }
}

/// 启动时建立连接池；数据库不可达时直接返回错误
pub fn build_pool(cfg: &DatabaseConfig) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(cfg.database_url.clone());
    Pool::builder()
        .max_size(cfg.pool_max_size)
        .connection_timeout(Duration::from_secs(cfg.connection_timeout_secs))
        .build(manager)
}

pub fn build_app(cfg: &DatabaseConfig) -> Result<Router, PoolError> {
    let db_pool = build_pool(cfg)?;
    tracing::info!("Connection pool established (max_size={})", cfg.pool_max_size);
    Ok(build_app_with_pool(
        db_pool,
        Duration::from_secs(cfg.db_timeout_secs),
    ))
}

pub fn build_app_with_pool(db_pool: DbPool, db_timeout: Duration) -> Router {
    let state = AppState { db_pool, db_timeout };

    routes::build_routes()
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use diesel::RunQueryDsl;

    use super::*;
    use crate::test_support;

    fn state(db_pool: DbPool, db_timeout: Duration) -> AppState {
        AppState { db_pool, db_timeout }
    }

    #[tokio::test]
    async fn slow_checkout_times_out_as_unavailable() {
        // 取连接会阻塞 2s，先于其触发请求级超时
        let app_state = state(
            test_support::unreachable_pool(Duration::from_secs(2)),
            Duration::from_millis(100),
        );
        let result = app_state.run_db(|_conn| Ok(())).await;
        assert!(matches!(result, Err(AppError::ServiceUnavailable)));
    }

    #[tokio::test]
    async fn failed_checkout_is_internal_error() {
        let app_state = state(
            test_support::unreachable_pool(Duration::from_millis(200)),
            Duration::from_secs(5),
        );
        let result = app_state.run_db(|_conn| Ok(())).await;
        assert!(matches!(result, Err(AppError::InternalServerError)));
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn slow_statement_times_out_as_unavailable() {
        let app_state = state(test_support::test_pool(), Duration::from_millis(100));
        let result = app_state
            .run_db(|conn| diesel::sql_query("SELECT pg_sleep(1)").execute(conn))
            .await;
        assert!(matches!(result, Err(AppError::ServiceUnavailable)));
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn fast_statement_returns_result() {
        let app_state = state(test_support::test_pool(), Duration::from_secs(5));
        let rows = app_state
            .run_db(|conn| diesel::sql_query("SELECT 1").execute(conn))
            .await;
        assert!(matches!(rows, Ok(1)));
    }
}
