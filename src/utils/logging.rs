use log::LevelFilter;

/// Install the global logger. `RUST_LOG` still wins over the `--debug` default.
pub(crate) fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}
