//! ログ初期化（stderrへ出力し、stdoutは結果表示に使う）

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` があればそれを優先する
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,sheet_match=debug,sheet_match_common=debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
