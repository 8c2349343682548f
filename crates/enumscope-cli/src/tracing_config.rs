//! Tracing setup for the `enumscope` binary.
//!
//! Output format is selected by `ENUMSCOPE_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `json`: one JSON object per event
//!
//! ```bash
//! ENUMSCOPE_LOG=debug enumscope format --type FileAccess 7
//! ENUMSCOPE_LOG=enumscope_runtime=trace ENUMSCOPE_LOG_FORMAT=json enumscope mi
//! ```
//!
//! The subscriber is only installed when `ENUMSCOPE_LOG` (or `RUST_LOG`) is
//! set. Everything goes to stderr; stdout carries formatted values and MI
//! replies.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("ENUMSCOPE_LOG_FORMAT").unwrap_or_default())
    }
}

/// `ENUMSCOPE_LOG` wins over `RUST_LOG`; both use `RUST_LOG` syntax.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("ENUMSCOPE_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Install the global subscriber, or do nothing when logging was not asked for.
pub fn init_tracing() {
    let has_own_log = std::env::var("ENUMSCOPE_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_own_log && !has_rust_log {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
