use std::time::Duration;

/// Default delay between two simulated upload progress steps.
pub const DEFAULT_UPLOAD_TICK: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct Config {
    /// delay between two simulated upload progress steps,
    ///  must not be zero
    pub upload_tick: Duration,
    /// start the file dashboard with the demo drive
    ///  instead of an empty root folder
    pub sample_tree: bool,

    // misc
    pub log_level: tracing::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upload_tick: DEFAULT_UPLOAD_TICK,
            sample_tree: true,
            log_level: tracing::Level::INFO,
        }
    }
}
