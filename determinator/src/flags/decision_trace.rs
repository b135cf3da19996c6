use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionEventKind {
    Start,
    Fail,
    Pass,
    Continue,
    TargetGroup,
    Random,
    Success,
    Info,
}

impl std::fmt::Display for DecisionEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DecisionEventKind::Start => "start",
                DecisionEventKind::Fail => "fail",
                DecisionEventKind::Pass => "pass",
                DecisionEventKind::Continue => "continue",
                DecisionEventKind::TargetGroup => "target_group",
                DecisionEventKind::Random => "random",
                DecisionEventKind::Success => "success",
                DecisionEventKind::Info => "info",
            }
        )
    }
}

/// One step of the reasoning behind a determination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionEvent {
    pub kind: DecisionEventKind,
    pub summary: String,
    pub rationale: String,
}

impl DecisionEvent {
    pub fn new(
        kind: DecisionEventKind,
        summary: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        DecisionEvent {
            kind,
            summary: summary.into(),
            rationale: rationale.into(),
        }
    }
}

/// Receives decision events. Tracers observe; they cannot change a decision.
pub trait DecisionTracer: Send + Sync {
    fn trace(&self, event: DecisionEvent);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl DecisionTracer for NoopTracer {
    fn trace(&self, _event: DecisionEvent) {}
}

/// Forwards decision events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTracer;

impl DecisionTracer for LoggingTracer {
    fn trace(&self, event: DecisionEvent) {
        match event.kind {
            DecisionEventKind::Success => tracing::info!(
                kind = %event.kind,
                rationale = %event.rationale,
                "{}",
                event.summary
            ),
            _ => tracing::debug!(
                kind = %event.kind,
                rationale = %event.rationale,
                "{}",
                event.summary
            ),
        }
    }
}

/// Keeps every event, in order. Handy for explaining a decision after the fact.
#[derive(Debug, Default)]
pub struct RecordingTracer {
    events: Mutex<Vec<DecisionEvent>>,
}

impl RecordingTracer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DecisionEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn events(&self) -> Vec<DecisionEvent> {
        self.lock().clone()
    }

    pub fn kinds(&self) -> Vec<DecisionEventKind> {
        self.events().iter().map(|e| e.kind).collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl DecisionTracer for RecordingTracer {
    fn trace(&self, event: DecisionEvent) {
        self.lock().push(event);
    }
}

impl<T: DecisionTracer + ?Sized> DecisionTracer for std::sync::Arc<T> {
    fn trace(&self, event: DecisionEvent) {
        (**self).trace(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&DecisionEventKind::TargetGroup).unwrap(),
            "\"target_group\""
        );
        assert_eq!(DecisionEventKind::TargetGroup.to_string(), "target_group");
    }

    #[test]
    fn test_recording_tracer_keeps_order() {
        let tracer = RecordingTracer::new();
        tracer.trace(DecisionEvent::new(DecisionEventKind::Start, "a", "first"));
        tracer.trace(DecisionEvent::new(DecisionEventKind::Fail, "b", "second"));

        assert_eq!(
            tracer.kinds(),
            vec![DecisionEventKind::Start, DecisionEventKind::Fail]
        );
        assert_eq!(tracer.events()[1].rationale, "second");

        tracer.clear();
        assert!(tracer.events().is_empty());
    }

    #[test]
    fn test_shared_tracer_through_arc() {
        let tracer = Arc::new(RecordingTracer::new());
        let shared: Box<dyn DecisionTracer> = Box::new(tracer.clone());
        shared.trace(DecisionEvent::new(DecisionEventKind::Info, "x", "y"));
        assert_eq!(tracer.events().len(), 1);
    }

    #[test]
    fn test_noop_and_logging_tracers_accept_events() {
        tracing_subscriber::fmt().with_test_writer().try_init().ok();
        NoopTracer.trace(DecisionEvent::new(DecisionEventKind::Pass, "p", "r"));
        LoggingTracer.trace(DecisionEvent::new(DecisionEventKind::Success, "s", "r"));
        LoggingTracer.trace(DecisionEvent::new(DecisionEventKind::Fail, "f", "r"));
    }
}
