//! tracing の初期化
//!
//! ログは stderr、利用者向けの出力は stdout に分ける。

use tracing_subscriber::EnvFilter;

/// RUST_LOG があればそれを使い、なければ warn（--verbose で debug）
pub fn init(verbose: bool) {
    let default = if verbose {
        "comprobantes=debug,comprobantes_common=debug,warn"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
