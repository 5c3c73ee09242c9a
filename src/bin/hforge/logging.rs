//! Diagnostic logging to stderr through `tracing-subscriber`.
//!
//! `RUST_LOG` wins when set; otherwise `-v` raises the library's level from
//! `warn` to `debug`, and `-vv` to `trace`.

use tracing_subscriber::EnvFilter;

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,haworth_forge=debug",
        _ => "warn,haworth_forge=trace",
    }
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_library_level() {
        assert_eq!(default_directive(0), "warn");
        assert!(default_directive(1).ends_with("debug"));
        assert!(default_directive(5).ends_with("trace"));
    }

    #[test]
    fn directives_parse() {
        for v in 0..3 {
            assert!(EnvFilter::try_new(default_directive(v)).is_ok());
        }
    }
}
