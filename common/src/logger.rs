use chrono::Local;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

/// Local wall-clock stamp, optionally followed by a fixed `[prefix]`.
struct PrefixedLocalTime {
    prefix: Option<String>,
}

impl FormatTime for PrefixedLocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        if let Some(ref prefix) = self.prefix {
            write!(w, "[{}][{}]", timestamp, prefix)
        } else {
            write!(w, "[{}]", timestamp)
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default `info`
/// level. Calling it again is a no-op.
pub fn init_logger(prefix: Option<String>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(PrefixedLocalTime { prefix })
        .with_target(false)
        .try_init();
}
