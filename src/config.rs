//! Settings for a run. There are no flags or config files; callers build
//! these directly, and `RUST_LOG` can still override the log level.

use crate::video_devices::linux::V4l2CtlConfig;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub logging: LoggingConfig,
    /// Only consulted on Linux.
    pub v4l2_ctl: V4l2CtlConfig
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset (e.g. "warn", "camera_enumerator=debug").
    pub level: String
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string()
        }
    }
}
