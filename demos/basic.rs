//! Basic usage example

use std::time::Duration;
use tagconf::{Config, Loader};

#[derive(Debug, Default, Config)]
struct AppConfig {
    // Required: loading fails when DATABASE_URL is missing or empty
    #[conf(env = "DATABASE_URL")]
    pub database_url: String,

    // With default value (a warning is logged when it is used)
    #[conf(env = "SERVER_ADDR", default = "127.0.0.1:8080")]
    pub server_addr: String,

    // Numeric type
    #[conf(env = "MAX_CONNECTIONS", default = "10")]
    pub max_connections: u32,

    // Optional: stays false when DEBUG_MODE is not set
    #[conf(env = "DEBUG_MODE,omitempty")]
    pub debug_mode: bool,

    // Go-style duration literal
    #[conf(env = "REQUEST_TIMEOUT", default = "1m30s")]
    pub request_timeout: Duration,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("SERVER_ADDR", "0.0.0.0:3000");

    // Load configuration
    let config: AppConfig = Loader::new().load()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Server Address: {}", config.server_addr);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);
    println!("  Request Timeout: {:?}", config.request_timeout);

    Ok(())
}
