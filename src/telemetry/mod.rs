//! Telemetry for submissions
//!
//! Collects attempt and fallback events in memory for the current run. Nothing
//! is persisted; the summary goes to stderr with `-v`.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Telemetry event types
#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    AttemptStarted {
        url: String,
        timestamp: Instant,
    },
    AttemptFailed {
        url: String,
        kind: &'static str,
        duration_ms: u64,
        timestamp: Instant,
    },
    AttemptSucceeded {
        url: String,
        duration_ms: u64,
        timestamp: Instant,
    },
    /// Moving on to the next endpoint in the chain
    Fallback {
        from: String,
        to: String,
        timestamp: Instant,
    },
    ValidationRejected {
        field: &'static str,
        timestamp: Instant,
    },
}

impl TelemetryEvent {
    pub fn timestamp(&self) -> Instant {
        match self {
            TelemetryEvent::AttemptStarted { timestamp, .. }
            | TelemetryEvent::AttemptFailed { timestamp, .. }
            | TelemetryEvent::AttemptSucceeded { timestamp, .. }
            | TelemetryEvent::Fallback { timestamp, .. }
            | TelemetryEvent::ValidationRejected { timestamp, .. } => *timestamp,
        }
    }

    /// One-line description for the summary timeline
    pub fn describe(&self) -> String {
        match self {
            TelemetryEvent::AttemptStarted { url, .. } => format!("POST {}", url),
            TelemetryEvent::AttemptFailed { url, kind, duration_ms, .. } => {
                format!("{} failed ({}) after {}ms", url, kind, duration_ms)
            }
            TelemetryEvent::AttemptSucceeded { url, duration_ms, .. } => {
                format!("{} answered in {}ms", url, duration_ms)
            }
            TelemetryEvent::Fallback { from, to, .. } => format!("fallback {} -> {}", from, to),
            TelemetryEvent::ValidationRejected { field, .. } => format!("rejected {}", field),
        }
    }
}

/// Telemetry statistics
#[derive(Debug, Clone, Default)]
pub struct TelemetryStats {
    pub attempts: usize,
    pub attempts_succeeded: usize,
    pub attempts_failed: usize,
    pub fallbacks: usize,
    pub validation_rejections: usize,
}

/// Telemetry collector
#[derive(Clone)]
pub struct TelemetryCollector {
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
    stats: Arc<Mutex<TelemetryStats>>,
    start_time: Instant,
}

impl TelemetryCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            stats: Arc::new(Mutex::new(TelemetryStats::default())),
            start_time: Instant::now(),
        }
    }

    /// Record an event
    pub fn record(&self, event: TelemetryEvent) {
        if let Ok(mut stats) = self.stats.lock() {
            match &event {
                TelemetryEvent::AttemptStarted { .. } => stats.attempts += 1,
                TelemetryEvent::AttemptFailed { .. } => stats.attempts_failed += 1,
                TelemetryEvent::AttemptSucceeded { .. } => stats.attempts_succeeded += 1,
                TelemetryEvent::Fallback { .. } => stats.fallbacks += 1,
                TelemetryEvent::ValidationRejected { .. } => stats.validation_rejections += 1,
            }
        }

        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    pub fn get_stats(&self) -> TelemetryStats {
        self.stats.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Offset of an event from the start of collection
    pub fn offset_of(&self, event: &TelemetryEvent) -> Duration {
        event.timestamp().saturating_duration_since(self.start_time)
    }

    /// Get recent events (last n)
    pub fn recent_events(&self, n: usize) -> Vec<TelemetryEvent> {
        match self.events.lock() {
            Ok(events) => {
                let start = events.len().saturating_sub(n);
                events[start..].to_vec()
            }
            Err(_) => Vec::new(),
        }
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Events shown in the summary timeline
const TIMELINE_LEN: usize = 20;

/// Prints the collected summary
pub struct TelemetryDisplay {
    collector: TelemetryCollector,
    verbosity: crate::cli::Verbosity,
}

impl TelemetryDisplay {
    pub fn new(collector: TelemetryCollector, verbosity: crate::cli::Verbosity) -> Self {
        Self { collector, verbosity }
    }

    /// Print the summary to stderr so stdout carries only results
    pub fn display_summary(&self) {
        let stderr = io::stderr();
        if let Err(e) = self.render_summary(&mut stderr.lock()) {
            tracing::debug!(error = %e, "could not write telemetry summary");
        }
    }

    pub fn render_summary(&self, out: &mut impl Write) -> io::Result<()> {
        if !self.should_show_details() {
            return Ok(());
        }
        let stats = self.collector.get_stats();

        writeln!(out, "\nSubmission Summary")?;
        writeln!(out, "-------------------------------------")?;
        writeln!(out, "Duration:          {:?}", self.collector.elapsed())?;
        writeln!(out, "Attempts:          {}", stats.attempts)?;
        writeln!(out, "Failed attempts:   {}", stats.attempts_failed)?;
        writeln!(out, "Fallbacks:         {}", stats.fallbacks)?;
        writeln!(out, "Rejected locally:  {}", stats.validation_rejections)?;
        for event in self.collector.recent_events(TIMELINE_LEN) {
            writeln!(
                out,
                "  +{:>5}ms {}",
                self.collector.offset_of(&event).as_millis(),
                event.describe()
            )?;
        }
        writeln!(out)
    }

    pub fn should_show_details(&self) -> bool {
        self.verbosity.show_events()
    }
}
