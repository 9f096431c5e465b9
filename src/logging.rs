use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("asana_tool={}", level)
}

/// Set up logging to stderr, plus a daily-rolling JSON file when `log_file`
/// is given.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// stops the file writer.
pub fn init(verbose: bool, log_file: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    let Some(log_path) = log_file else {
        let _ = registry.try_init();
        return None;
    };

    let dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let _ = std::fs::create_dir_all(dir);
    let file_name = log_path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("asana-tool.log"));

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
        dir, file_name,
    ));
    let file_layer = fmt::layer().with_writer(writer).with_ansi(false).json();

    let _ = registry.with(file_layer).try_init();
    Some(guard)
}
