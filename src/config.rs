//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;

use crate::domain::SalesContext;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Fixed factory/sales metadata stamped onto every invoice
    pub sales: SalesContext,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingEnv("DATABASE_URL"))?;

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        // The factory metadata stamped onto invoices has no sensible
        // default; all three variables are required.
        let sales = SalesContext {
            sales_person: env::var("SALES_PERSON")
                .map_err(|_| ConfigError::MissingEnv("SALES_PERSON"))?,
            factory_details: env::var("FACTORY_DETAILS")
                .map_err(|_| ConfigError::MissingEnv("FACTORY_DETAILS"))?,
            factory_phone_number: env::var("FACTORY_PHONE")
                .map_err(|_| ConfigError::MissingEnv("FACTORY_PHONE"))?,
        };

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            environment,
            sales,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
