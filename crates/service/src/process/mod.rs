use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use common::prelude::build_info;

/// Install the global subscriber. Hold on to the returned guard until
///  the process exits or buffered lines are lost.
pub fn init_tracing(log_level: tracing::Level) -> WorkerGuard {
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level).into())
        .from_env_lossy();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);

    if tracing_subscriber::registry()
        .with(stdout_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }

    register_panic_logger();
    report_build_info();

    guard
}

fn register_panic_logger() {
    std::panic::set_hook(Box::new(|panic_info| {
        match panic_info.location() {
            Some(location) => tracing::error!(
                message = %panic_info,
                panic.file = location.file(),
                panic.line = location.line(),
                panic.column = location.column(),
            ),
            None => tracing::error!(message = %panic_info),
        }
    }));
}

fn report_build_info() {
    let build = build_info();
    tracing::debug!(
        build_profile = ?build.build_profile,
        build_timestamp = ?build.build_timestamp,
        git_hash = ?build.git_hash,
        target = ?build.target,
        version = ?build.version,
        "starting up",
    );
}
