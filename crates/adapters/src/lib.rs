//! # kvlog-adapters
//!
//! Concrete implementations of the [`Logger`](kvlog_ports::Logger) capability
//! (JSON lines and text lines), the byte sinks they write to, and a writer
//! bridge for text-oriented logging consumers.
//! This crate depends on `ports` and `shared`.

pub mod bridge;
pub mod log_sink;
pub mod logger;

pub use bridge::LoggerWriter;
pub use log_sink::{LogSink, SharedBuffer, StderrLogSink, StdoutLogSink, WriterSink};
pub use logger::{JsonLogger, TextLogger};

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvlog_ports::ports_crate_version;
    use kvlog_shared::shared_crate_version;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]" || line == "[dev-dependencies]";
                continue;
            }
            if in_deps && line.starts_with("kvlog") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn adapters_do_not_depend_on_config_or_facade() {
        let deps = workspace_deps();
        let forbidden = ["kvlog-config", "kvlog"];

        for dep in &deps {
            assert!(
                !forbidden.contains(&dep.as_str()),
                "forbidden dependency found: {dep}"
            );
        }
    }

    #[test]
    fn adapters_can_use_ports_and_shared() {
        assert!(!adapters_crate_version().is_empty());
        assert!(!ports_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }
}
