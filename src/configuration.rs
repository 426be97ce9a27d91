use clap::{Parser, ValueEnum};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// What to do when one of the two reads fails
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Any failure replaces both collections with the fallback pools
    #[default]
    Combined,
    /// Each collection falls back on its own
    Independent,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "alumni-connect", version, about = "AI-powered ride pooling, in the terminal")]
pub struct Configuration {
    /// Base address of the pools API
    #[arg(long, env = "ALUMNI_CONNECT_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Replace both days with the fallback pools on any failure, or each day on its own
    #[arg(long, value_enum, env = "ALUMNI_CONNECT_FALLBACK", default_value_t = FallbackPolicy::Combined)]
    pub fallback: FallbackPolicy,

    /// Give up on a read after this many seconds. Waits forever when unset
    #[arg(long, env = "ALUMNI_CONNECT_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Read commands from stdin after the first render
    #[arg(long)]
    pub interactive: bool,
}

impl Configuration {
    pub fn base_url(&self) -> &str {
        let url = self.api_url.trim().trim_end_matches('/');
        if url.is_empty() {
            DEFAULT_API_URL
        } else {
            url
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
impl Configuration {
    pub fn new(api_url: impl Into<String>) -> Self {
        Configuration {
            api_url: api_url.into(),
            fallback: FallbackPolicy::Combined,
            timeout_secs: None,
            interactive: false,
        }
    }
}
