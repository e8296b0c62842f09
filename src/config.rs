use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub ml: MlConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64, // seconds
}

#[derive(Debug, Clone, Deserialize)]
pub struct MlConfig {
    pub service_url: Option<String>,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    pub admin_email: String,
    pub admin_password: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("Failed to parse PORT")?,
                frontend_url: env::var("FRONTEND_URL")
                    .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").ok(),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("Failed to parse DATABASE_MAX_CONNECTIONS")?,
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
                access_token_expiry: env::var("JWT_ACCESS_TOKEN_EXPIRY")
                    .unwrap_or_else(|_| "3600".to_string())
                    .parse()
                    .context("Failed to parse JWT_ACCESS_TOKEN_EXPIRY")?,
            },
            ml: MlConfig {
                service_url: env::var("ML_SERVICE_URL").ok(),
                request_timeout_ms: env::var("ML_REQUEST_TIMEOUT_MS")
                    .unwrap_or_else(|_| "1200".to_string())
                    .parse()
                    .context("Failed to parse ML_REQUEST_TIMEOUT_MS")?,
            },
            seed: SeedConfig {
                admin_email: env::var("SEED_ADMIN_EMAIL")
                    .unwrap_or_else(|_| "admin@learnhub.dev".to_string()),
                admin_password: env::var("SEED_ADMIN_PASSWORD")
                    .unwrap_or_else(|_| "AdminPass123!".to_string()),
            },
        };

        // Validate JWT secret length (minimum 32 characters for security)
        if config.jwt.secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        Ok(config)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
