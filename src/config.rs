//! Configuration and CLI argument handling

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "focus-time")]
#[command(about = "A local focus timer service with session flow, quotes and sound cues")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20525")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Default focus session length in minutes
    #[arg(short, long, default_value = "25")]
    pub focus: u64,

    /// Default rest session length in minutes
    #[arg(short, long, default_value = "5")]
    pub rest: u64,

    /// Seconds between quote rotations
    #[arg(long, default_value = "60")]
    pub quote_interval: u64,

    /// Sound cue volume between 0.0 and 1.0
    #[arg(long, default_value = "0.5")]
    pub volume: f32,

    /// Start with sound cues disabled
    #[arg(short, long)]
    pub mute: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

impl Default for Config {
    fn default() -> Self {
        Parser::parse_from(["focus-time"])
    }
}
