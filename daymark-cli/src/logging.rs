use tracing_subscriber::EnvFilter;

/// `-v` count to log level: warn, info, debug, then trace for `-vvv` and up.
fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directives covering the binary and the core library only.
fn default_directives(verbosity: u8) -> String {
    let level = level(verbosity);
    format!("daymark={level},daymark_core={level}")
}

/// Log to stderr so command output on stdout stays pipeable.
///
/// `RUST_LOG` replaces the `-v` based filter when set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_both_targets() {
        assert_eq!(default_directives(0), "daymark=warn,daymark_core=warn");
        assert_eq!(default_directives(2), "daymark=debug,daymark_core=debug");
        assert_eq!(default_directives(9), "daymark=trace,daymark_core=trace");
    }
}
