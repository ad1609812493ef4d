//! Custom leaf types and coercers

use std::net::IpAddr;
use tagconf::{
    CoercerTable, Config, DefaultCoercers, EnvSource, FieldType, Kind, Leaf, Loader, ParseError,
    Value,
};

/// An IP address, parsed by its own coercer
#[derive(Debug, Clone, Copy, PartialEq)]
struct Ip(IpAddr);

impl Default for Ip {
    fn default() -> Self {
        Ip(IpAddr::from([127, 0, 0, 1]))
    }
}

impl Leaf for Ip {
    fn field_type() -> FieldType {
        FieldType::of::<Ip>(Kind::Other)
    }

    fn from_value(value: Value) -> Result<Self, ParseError> {
        let text = String::from_value(value)?;
        text.parse().map(Ip).map_err(ParseError::custom)
    }
}

// Validates the address, then hands the string to `Ip::from_value`.
fn coerce_ip(raw: &str) -> Result<Value, ParseError> {
    raw.parse::<IpAddr>().map_err(ParseError::custom)?;
    Ok(Value::String(raw.to_string()))
}

// Accepts only "on" and "off".
fn coerce_switch(raw: &str) -> Result<Value, ParseError> {
    match raw {
        "on" => Ok(Value::Bool(true)),
        "off" => Ok(Value::Bool(false)),
        other => Err(ParseError::custom(format!("expected on or off, got {other:?}"))),
    }
}

/// A port number, parsed by the stock `u16` coercer through its kind
#[derive(Debug, Default, Clone, Copy)]
struct Port(u16);

impl Leaf for Port {
    fn field_type() -> FieldType {
        FieldType::of::<Port>(Kind::U16)
    }

    fn from_value(value: Value) -> Result<Self, ParseError> {
        u16::from_value(value).map(Port)
    }
}

#[derive(Debug, Default, Config)]
struct ListenConfig {
    #[conf(env = "LISTEN_ADDR")]
    pub addr: Ip,

    #[conf(env = "LISTEN_PORT", default = "8080")]
    pub port: Port,

    #[conf(env = "LISTEN_TLS", default = "off")]
    pub tls: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    std::env::set_var("LISTEN_ADDR", "::1");
    std::env::set_var("LISTEN_TLS", "on");

    // The custom table comes first, so its bool coercer shadows the built-in one
    let loader = Loader::empty()
        .with_coercers(
            CoercerTable::new()
                .with_type::<Ip>(coerce_ip)
                .with_kind(Kind::Bool, coerce_switch),
        )
        .with_coercers(DefaultCoercers)
        .with_source(EnvSource)
        .use_defaults();

    let config: ListenConfig = loader.load()?;

    println!("Configuration loaded:");
    println!("  Address: {}", config.addr.0);
    println!("  Port: {}", config.port.0);
    println!("  TLS: {}", config.tls);

    Ok(())
}
