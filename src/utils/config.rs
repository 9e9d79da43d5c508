use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 5;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),
}

/// HOST 可以是 IP、主机名或 IPv6（带不带方括号均可），绑定时再解析
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST")
            .map(|value| value.trim().trim_start_matches('[').trim_end_matches(']').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_positive(lookup("PORT"), DEFAULT_PORT);
        Self { host, port }
    }

    pub async fn bind(&self) -> std::io::Result<tokio::net::TcpListener> {
        tokio::net::TcpListener::bind((self.host.as_str(), self.port)).await
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub pool_max_size: u32,
    pub connection_timeout_secs: u64,
    /// 单次数据库调用的请求级超时
    pub db_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingEnv("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            pool_max_size: parse_positive(lookup("DB_POOL_MAX_SIZE"), DEFAULT_POOL_MAX_SIZE),
            connection_timeout_secs: parse_positive(
                lookup("DB_CONNECTION_TIMEOUT_SECS"),
                DEFAULT_CONNECTION_TIMEOUT_SECS,
            ),
            db_timeout_secs: parse_positive(lookup("DB_TIMEOUT_SECS"), DEFAULT_DB_TIMEOUT_SECS),
        })
    }
}

/// 解析失败或为 0 时回退到默认值
fn parse_positive<T>(raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + PartialEq + Default,
{
    raw.and_then(|value| value.trim().parse().ok())
        .filter(|value: &T| *value != T::default())
        .unwrap_or(default)
}
