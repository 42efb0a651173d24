use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_env")]
    pub env: String,

    #[serde(default = "default_app_host")]
    pub host: String,

    #[serde(default = "default_app_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_db_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,

    /// Signing algorithm identifier, e.g. "HS256"
    #[serde(default = "default_jwt_algorithm")]
    pub algorithm: String,

    #[serde(default = "default_jwt_access_ttl_minutes")]
    pub access_token_ttl_minutes: i64,

    #[serde(default = "default_jwt_refresh_ttl_days")]
    pub refresh_token_ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, or "*" to allow any
    pub allowed_origins: String,

    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

// Default value functions
fn default_app_env() -> String {
    "development".to_string()
}

fn default_app_host() -> String {
    "0.0.0.0".to_string()
}

fn default_app_port() -> u16 {
    8080
}

fn default_db_max_connections() -> u32 {
    20
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_jwt_access_ttl_minutes() -> i64 {
    30
}

fn default_jwt_refresh_ttl_days() -> i64 {
    7
}

fn default_cors_max_age() -> u64 {
    3600
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv::dotenv().ok();

        let app = AppConfig {
            env: env::var("APP_ENV").unwrap_or_else(|_| default_app_env()),
            host: env::var("APP_HOST").unwrap_or_else(|_| default_app_host()),
            port: env::var("APP_PORT")
                .unwrap_or_else(|_| default_app_port().to_string())
                .parse()
                .unwrap_or(default_app_port()),
        };

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| default_db_max_connections().to_string())
                .parse()
                .unwrap_or(default_db_max_connections()),
        };

        let jwt = JwtConfig {
            secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?,
            algorithm: env::var("JWT_ALGORITHM").unwrap_or_else(|_| default_jwt_algorithm()),
            access_token_ttl_minutes: env::var("JWT_ACCESS_TOKEN_TTL_MINUTES")
                .unwrap_or_else(|_| default_jwt_access_ttl_minutes().to_string())
                .parse()
                .unwrap_or(default_jwt_access_ttl_minutes()),
            refresh_token_ttl_days: env::var("JWT_REFRESH_TOKEN_TTL_DAYS")
                .unwrap_or_else(|_| default_jwt_refresh_ttl_days().to_string())
                .parse()
                .unwrap_or(default_jwt_refresh_ttl_days()),
        };

        let cors = CorsConfig {
            allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            max_age: env::var("CORS_MAX_AGE")
                .unwrap_or_else(|_| default_cors_max_age().to_string())
                .parse()
                .unwrap_or(default_cors_max_age()),
        };

        Ok(Config {
            app,
            database,
            jwt,
            cors,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_env(), "development");
        assert_eq!(default_app_host(), "0.0.0.0");
        assert_eq!(default_app_port(), 8080);
        assert_eq!(default_jwt_algorithm(), "HS256");
        assert_eq!(default_jwt_access_ttl_minutes(), 30);
        assert_eq!(default_jwt_refresh_ttl_days(), 7);
    }
}
