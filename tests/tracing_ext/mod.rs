use std::sync::{Arc, Mutex};

use outcome_rail::tracing_ext::ResultTraceExt;
use outcome_rail::{AsyncResult, Cause};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Metadata, Span, Subscriber};

#[derive(Clone, Default)]
struct LevelRecorder {
    levels: Arc<Mutex<Vec<Level>>>,
}

impl LevelRecorder {
    fn levels(&self) -> Vec<Level> {
        self.levels.lock().unwrap().clone()
    }
}

impl Subscriber for LevelRecorder {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _: &Id, _: &Record<'_>) {}

    fn record_follows_from(&self, _: &Id, _: &Id) {}

    fn event(&self, event: &Event<'_>) {
        self.levels.lock().unwrap().push(*event.metadata().level());
    }

    fn enter(&self, _: &Id) {}

    fn exit(&self, _: &Id) {}
}

#[test]
fn level_follows_outcome_kind() {
    let recorder = LevelRecorder::default();

    tracing::subscriber::with_default(recorder.clone(), || {
        AsyncResult::<u8, &str>::success(1).log_outcome("load");
        AsyncResult::<u8, &str>::fail("denied").log_outcome("load");
        AsyncResult::<u8, &str>::interrupt().log_outcome("load");
        AsyncResult::<u8, &str>::failure(Cause::fail("denied").both(Cause::die("boom")))
            .log_outcome("load");
    });

    assert_eq!(recorder.levels(), vec![Level::DEBUG, Level::WARN, Level::INFO, Level::ERROR]);
}

#[test]
fn logged_hands_the_result_back() {
    let recorder = LevelRecorder::default();

    let result = tracing::subscriber::with_default(recorder.clone(), || {
        AsyncResult::<u8, &str>::success(9).logged("compute")
    });

    assert_eq!(result.value(), Some(&9));
    assert_eq!(recorder.levels(), vec![Level::DEBUG]);
}

#[test]
fn log_outcome_in_runs_inside_the_span() {
    let recorder = LevelRecorder::default();

    tracing::subscriber::with_default(recorder.clone(), || {
        let span = Span::none();
        AsyncResult::<u8, &str>::die("crash").log_outcome_in(&span, "compute");
    });

    assert_eq!(recorder.levels(), vec![Level::ERROR]);
}
