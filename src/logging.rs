use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// ログを初期化する
///
/// `RUST_LOG` が優先。未設定なら `--verbose` で debug、通常は warn。
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
