//! Ignoring every source in favor of annotated defaults
//!
//! Useful for tests and for printing the out-of-the-box configuration.

use std::time::Duration;
use tagconf::{Config, Loader};

#[derive(Debug, Default, Config)]
struct WorkerConfig {
    #[conf(env = "WORKER_THREADS", default = "4")]
    pub threads: usize,

    #[conf(env = "WORKER_POLL_INTERVAL", default = "250ms")]
    pub poll_interval: Duration,

    // No default: still resolved from nothing, so it must allow empty values
    #[conf(env = "WORKER_QUEUE,omitempty")]
    pub queue: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    std::env::set_var("WORKER_THREADS", "32");

    let from_env: WorkerConfig = Loader::new().load()?;
    let defaults: WorkerConfig = Loader::new().force_defaults().load()?;

    println!("From environment: {from_env:?}");
    println!("Defaults only:    {defaults:?}");

    Ok(())
}
