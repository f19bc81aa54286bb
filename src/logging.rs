//! Logger setup for the `clockface` binary and demos.
//!
//! The library itself only talks to the `log` facade.

use log::LevelFilter;

/// Targets that flood the log once a pixels surface is up.
const GPU_TARGETS: &[&str] = &["wgpu_core", "wgpu_hal", "naga"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Level used when `RUST_LOG` is unset.
    pub level: LevelFilter,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            timestamps: false,
        }
    }
}

impl LoggingConfig {
    /// Debug output for `--verbose`, info otherwise.
    pub fn verbose(verbose: bool) -> Self {
        Self {
            level: if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            ..Self::default()
        }
    }
}

/// Filter string for `level`, with the GPU stack held at warn or quieter.
pub fn default_filter(level: LevelFilter) -> String {
    let gpu_level = level.min(LevelFilter::Warn).as_str().to_ascii_lowercase();
    let mut filter = level.as_str().to_ascii_lowercase();
    for target in GPU_TARGETS {
        filter.push_str(&format!(",{target}={gpu_level}"));
    }
    filter
}

/// Installs the global logger. `RUST_LOG` overrides `config.level`.
///
/// Returns `false` when another logger was already installed.
pub fn init_logging(config: LoggingConfig) -> bool {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(config.level));

    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&filter);
    if !config.timestamps {
        builder.format_timestamp(None);
    }

    let installed = builder.try_init().is_ok();
    if installed {
        log::debug!("logging initialized with {filter:?}");
    }
    installed
}
