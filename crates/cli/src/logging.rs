//! `tracing` setup for the `meisai` binary.
//!
//! Logs go to stderr so a document written to stdout stays clean. `RUST_LOG`
//! overrides the level picked from `-v`/`-q`.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATES: &[&str] = &["meisai", "meisai_cli", "meisai_core", "meisai_import", "meisai_export"];

/// Map `-v` count minus `-q` count to a level. Warnings show by default.
pub fn level_from_flags(verbose: u8, quiet: u8) -> Level {
    match i16::from(verbose) - i16::from(quiet) {
        i16::MIN..=-1 => Level::ERROR,
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(level: Level) {
    tracing_subscriber::registry()
        .with(build_env_filter(level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}

/// Our crates log at `level`; dependencies stay at `warn`.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)))
}

fn directives(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATES.iter().map(|c| format!("{c}={level}")));
    directives.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_warn() {
        assert_eq!(level_from_flags(0, 0), Level::WARN);
    }

    #[test]
    fn verbose_and_quiet_offset() {
        assert_eq!(level_from_flags(1, 0), Level::INFO);
        assert_eq!(level_from_flags(2, 0), Level::DEBUG);
        assert_eq!(level_from_flags(5, 0), Level::TRACE);
        assert_eq!(level_from_flags(0, 1), Level::ERROR);
        assert_eq!(level_from_flags(2, 1), Level::INFO);
    }

    #[test]
    fn directives_cover_workspace_crates() {
        let d = directives(Level::DEBUG);
        assert!(d.starts_with("warn,"));
        assert!(d.contains("meisai_import=debug"));
        assert!(d.contains("meisai_export=debug"));
    }
}
