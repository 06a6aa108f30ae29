pub use tracing::{debug, error, info, warn, trace, instrument};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Directive used when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVE: &str = "info";

#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    /// Log busy/idle time of each pipeline stage (decode, flatten, resize,
    /// encode, size_target) as its span closes.
    pub stage_timings: bool,
}

impl LogOptions {
    /// Stage timings are on when asked for, and always at debug or trace.
    fn span_events(&self, filter: &EnvFilter) -> FmtSpan {
        let verbose = matches!(filter.max_level_hint(), Some(level) if level >= LevelFilter::DEBUG);
        if self.stage_timings || verbose {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

pub fn init(options: LogOptions) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(options.span_events(&env_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_timings_off_by_default() {
        let options = LogOptions::default();
        assert_eq!(options.span_events(&EnvFilter::new("info")), FmtSpan::NONE);
    }

    #[test]
    fn test_stage_timings_flag_enables_close_events() {
        let options = LogOptions { stage_timings: true };
        assert_eq!(options.span_events(&EnvFilter::new("warn")), FmtSpan::CLOSE);
    }

    #[test]
    fn test_debug_filter_enables_close_events() {
        let options = LogOptions::default();
        assert_eq!(options.span_events(&EnvFilter::new("debug")), FmtSpan::CLOSE);
        assert_eq!(options.span_events(&EnvFilter::new("image_normalizer=trace")), FmtSpan::CLOSE);
    }
}
