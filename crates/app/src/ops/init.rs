use clap::Args;

use crate::state::{AppConfig, AppState};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Default log level (default: warn)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Delay between simulated upload steps in milliseconds (default: 300)
    #[arg(long, default_value_t = 300)]
    pub upload_tick_ms: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] crate::state::StateError),
}

#[async_trait::async_trait]
impl crate::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            log_level: self.log_level.clone(),
            upload_tick_ms: self.upload_tick_ms,
        };

        let state = AppState::init(&ctx.app_dir, config)?;

        let output = format!(
            "Initialized skycloud directory at: {}\n\
             - Config: {}\n\
             - Log level: {}\n\
             - Upload tick: {}ms",
            state.app_dir.display(),
            state.config_path.display(),
            state.config.log_level,
            state.config.upload_tick_ms
        );

        Ok(output)
    }
}
