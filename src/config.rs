use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server_port: u16,
    pub log_level: String,
    /// Period between simulated progress ticks, in milliseconds.
    pub tick_ms: u64,
    /// Largest per-tick progress increment, in percent.
    pub max_increment: u8,
    /// Hard stop for a record's simulation, in milliseconds. A record
    /// still below 100% when this fires stops ticking.
    pub ceiling_ms: u64,
    /// When true, a record cut off by the ceiling moves to `error`
    /// instead of staying `uploading` forever.
    pub stall_to_error: bool,
    pub max_file_size_mb: u64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            // Default settings
            .set_default("server_port", 3000)?
            .set_default("log_level", "info")?
            .set_default("tick_ms", 500)?
            .set_default("max_increment", 30)?
            .set_default("ceiling_ms", 3000)?
            .set_default("stall_to_error", false)?
            .set_default("max_file_size_mb", 50)?
            // Config file (optional)
            .add_source(File::with_name("config").required(false))
            // Environment variables (e.g. LEXISERVE_SERVER_PORT=8080)
            .add_source(Environment::with_prefix("LEXISERVE"));

        builder.build()?.try_deserialize()
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}
