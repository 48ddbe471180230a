use std::io::{self, IsTerminal};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Targets that belong to this workspace. Events from other crates (hyper,
/// reqwest, tower) are left to the global filter only.
pub const WORKSPACE_TARGETS: &[&str] = &[
    "ai_llm_service",
    "interview_ai",
    "interview_store",
    "api",
    "interview_prep_backend",
    "tower_http",
];

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Formatting layer for the service, writing to stdout.
///
/// - RFC3339 UTC timestamps with second precision
/// - compact single-line events with level, target and `file:line`
/// - span close events (so `#[instrument]`ed handlers report their duration)
/// - ANSI colors only when stdout is a terminal
///
/// Only events whose target starts with one of [`WORKSPACE_TARGETS`] pass.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    layer_with_writer(io::stdout, io::stdout().is_terminal())
}

/// Same as [`layer`], with an explicit writer.
pub fn layer_with_writer<S, W>(writer: W, ansi: bool) -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let ours = filter::filter_fn(|meta| {
        WORKSPACE_TARGETS
            .iter()
            .any(|prefix| meta.target().starts_with(prefix))
    });

    // The timer and field toggles live on the event format; the layer only
    // owns the writer.
    let format = fmt::format()
        .compact()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_source_location(true);

    fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(format)
        .with_filter(ours)
}

/// `RUST_LOG` if set, otherwise `default` (e.g. `"info"`).
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn render(emit: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber =
            tracing_subscriber::registry().with(layer_with_writer(move || writer.clone(), false));
        tracing::subscriber::with_default(subscriber, emit);

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn events_carry_second_precision_rfc3339_timestamps() {
        let out = render(|| tracing::info!(target: "ai_llm_service", "hello"));
        let line = out.lines().next().expect("one line");

        let stamp = line.split_whitespace().next().expect("timestamp");
        assert_eq!(stamp.len(), "2025-09-12T10:20:30Z".len(), "{line}");
        assert!(stamp.ends_with('Z') && !stamp.contains('.'), "{line}");
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok(), "{line}");

        assert!(line.contains("INFO"), "{line}");
        assert!(line.contains("ai_llm_service"), "{line}");
        assert!(line.contains("hello"), "{line}");
    }

    #[test]
    fn foreign_targets_are_dropped() {
        let out = render(|| tracing::info!(target: "hyper::proto", "noise"));
        assert!(out.is_empty(), "{out}");
    }
}
