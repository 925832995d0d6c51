//! Logging setup for the `walkin` binary.
//!
//! Events from this crate follow the requested verbosity. Everything else
//! (axum, hyper, tokio) is held at a floor so serve failures still show up
//! without the per-request chatter.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Intake, assignment and startup events.
    #[default]
    Normal,
    /// Adds file loads, saves and id sequence updates.
    Verbose,
    /// Everything, including dependency info events.
    Trace,
}

impl Verbosity {
    /// Level applied to `walkin` targets.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Level applied to every other target.
    #[must_use]
    pub fn dependency_level(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal | Self::Verbose => Level::WARN,
            Self::Trace => Level::INFO,
        }
    }

    /// Filter directives used when `RUST_LOG` is not set.
    #[must_use]
    pub fn default_directives(&self) -> String {
        format!(
            "{},walkin={}",
            self.dependency_level(),
            self.to_level_filter()
        )
        .to_lowercase()
    }
}

/// Build the event filter.
///
/// A valid `rust_log` wins; an invalid one is reported on stderr and the
/// verbosity defaults apply.
#[must_use]
pub fn build_filter(verbosity: Verbosity, rust_log: Option<&str>) -> EnvFilter {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        match EnvFilter::try_new(directives) {
            Ok(filter) => return filter,
            Err(err) => eprintln!("ignoring invalid RUST_LOG {directives:?}: {err}"),
        }
    }
    EnvFilter::new(verbosity.default_directives())
}

/// Initialize the logging system.
///
/// Call once at startup. `RUST_LOG` overrides `verbosity`.
///
/// # Examples
///
/// ```no_run
/// use walkin::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    let subscriber = tracing_subscriber::registry()
        .with(build_filter(verbosity, rust_log.as_deref()))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        );

    // A second call keeps the first subscriber
    let _ = subscriber.try_init();
}
