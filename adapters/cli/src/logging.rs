use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// `RUST_LOG` takes precedence. Otherwise only warnings are shown, or debug
/// messages as well when `verbose` is `true`, keeping stderr free for the
/// per-turn diagnostic log.
pub(crate) fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let env = Env::default().default_filter_or(level.to_string());
    // `try_init` only fails if a logger was already installed.
    let _ = Builder::from_env(env).try_init();
}
