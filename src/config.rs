//! Application configuration loaded from environment variables.

use std::fmt;

use serde::Deserialize;
use sqlx::mysql::MySqlConnectOptions;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Clone, Deserialize)]
pub struct Config {
    // === Database ===
    /// MySQL host.
    #[serde(default = "default_db_host")]
    pub db_host: String,

    /// MySQL port.
    #[serde(default = "default_db_port")]
    pub db_port: u16,

    /// MySQL user.
    #[serde(default = "default_db_user")]
    pub db_user: String,

    /// MySQL password.
    #[serde(default = "default_db_password")]
    pub db_password: String,

    /// Database holding the `users` table.
    #[serde(default = "default_db_name")]
    pub db_name: String,

    // === Server ===
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log filter (trace, debug, info, warn, error or a full directive).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Log output format.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

fn default_db_host() -> String {
    "127.0.0.1".to_string()
}

fn default_db_port() -> u16 {
    3306
}

fn default_db_user() -> String {
    "root".to_string()
}

fn default_db_password() -> String {
    "my-secret-pw".to_string()
}

fn default_db_name() -> String {
    "hyf_node_week1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Text
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_host: default_db_host(),
            db_port: default_db_port(),
            db_user: default_db_user(),
            db_password: default_db_password(),
            db_name: default_db_name(),
            port: default_port(),
            rust_log: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

// Hand-written so the password never reaches the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &"<redacted>")
            .field("db_name", &self.db_name)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.db_host.trim().is_empty() {
            return Err("DB_HOST must not be empty".to_string());
        }

        if self.db_port == 0 {
            return Err("DB_PORT must be greater than 0".to_string());
        }

        if self.db_user.trim().is_empty() {
            return Err("DB_USER must not be empty".to_string());
        }

        if self.db_name.trim().is_empty() {
            return Err("DB_NAME must not be empty".to_string());
        }

        Ok(())
    }

    /// Connection options for the users database.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
    }

    /// Database target for log lines, without credentials.
    pub fn database_target(&self) -> String {
        format!("mysql://{}:{}/{}", self.db_host, self.db_port, self.db_name)
    }
}
