//! Loading from dotenv files layered under the process environment

use std::fs;
use tagconf::{Config, DefaultCoercers, DotenvSource, EnvSource, Loader};

#[derive(Debug, Default, Config)]
struct Database {
    #[conf(env = "DATABASE_HOST")]
    pub host: String,

    #[conf(env = "DATABASE_PORT", default = "5432")]
    pub port: u16,
}

#[derive(Debug, Default, Config)]
struct AppConfig {
    #[conf(env = "APP_NAME")]
    pub name: String,

    #[conf(env = "ALLOWED_ORIGINS")]
    pub allowed_origins: Vec<String>,

    #[conf(title = "Database")]
    pub database: Database,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let dir = tempfile::tempdir()?;
    let local = dir.path().join(".env.local");
    let shared = dir.path().join(".env");

    // Earlier files win, so local overrides go first
    fs::write(&local, "DATABASE_HOST=localhost\n")?;
    fs::write(
        &shared,
        "APP_NAME=demo\nALLOWED_ORIGINS=https://a.example,https://b.example\nDATABASE_HOST=db.internal\n",
    )?;

    // The process environment takes precedence over both files
    std::env::set_var("APP_NAME", "from-env");

    let loader = Loader::empty()
        .with_coercers(DefaultCoercers)
        .with_source(EnvSource)
        .with_source(DotenvSource::from_paths([&local, &shared])?)
        .use_defaults();

    let config: AppConfig = loader.load()?;

    println!("Configuration loaded:");
    println!("  Name: {}", config.name);
    println!("  Allowed Origins: {:?}", config.allowed_origins);
    println!("  Database: {}:{}", config.database.host, config.database.port);

    Ok(())
}
