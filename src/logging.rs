//! ログ出力の初期化
//!
//! グローバルには登録せず、返したガードが生きている間だけ有効。

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "MATERIAL_EXCEL_LOG";

pub fn init(verbose: bool) -> DefaultGuard {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_default(subscriber)
}
