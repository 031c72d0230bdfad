use std::error::Error;
use std::path::PathBuf;

use service::ServiceConfig;

use crate::state::{AppConfig, AppState, StateError};

#[derive(Debug, Clone)]
pub struct OpContext {
    /// Directory holding config.toml
    pub app_dir: PathBuf,
    /// Loaded configuration, or defaults when not initialized
    pub config: AppConfig,
    pub initialized: bool,
    pub service: ServiceConfig,
}

impl OpContext {
    /// Create context from `app_dir` (or ~/.skycloud if None)
    pub fn new(app_dir: Option<PathBuf>) -> Result<Self, StateError> {
        let app_dir = match app_dir {
            Some(dir) => dir,
            None => AppState::default_dir()?,
        };

        let (config, initialized) = match AppState::load(&app_dir) {
            Ok(state) => (state.config, true),
            Err(StateError::NotInitialized) => (AppConfig::default(), false),
            Err(e) => return Err(e),
        };
        let service = config.service_config()?;

        Ok(Self {
            app_dir,
            config,
            initialized,
            service,
        })
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
