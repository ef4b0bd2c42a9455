//! Background generation.
//!
//! One run per thread. The caller gets a [`GenerationTask`] back immediately
//! and reads [`GenerationEvent`]s off its channel: any number of progress
//! events, then exactly one `Complete` or `Failed`. Runs share nothing, so
//! several can be in flight at once.

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::config::PlannerConfig;
use crate::error::FolioError;
use crate::generate::{Generator, Progress};
use crate::pdf::PdfWriter;
use crate::writer::DocumentWriter;

#[derive(Debug)]
pub enum GenerationEvent {
    Progress(Progress),
    Complete(Vec<u8>),
    Failed(FolioError),
}

pub struct GenerationTask {
    events: Receiver<GenerationEvent>,
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

/// Start generating a PDF for `config` on a new thread.
pub fn spawn(config: PlannerConfig) -> GenerationTask {
    let writer = PdfWriter::new().with_title(config.document_title());
    spawn_with(config, writer)
}

/// Start generating on a new thread with any document writer.
pub fn spawn_with<W>(config: PlannerConfig, writer: W) -> GenerationTask
where
    W: DocumentWriter + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);

    let handle = thread::spawn(move || run(config, writer, flag, tx));

    GenerationTask {
        events: rx,
        cancel,
        handle: Some(handle),
    }
}

fn run<W: DocumentWriter>(
    config: PlannerConfig,
    writer: W,
    cancel: Arc<AtomicBool>,
    tx: Sender<GenerationEvent>,
) {
    let mut sink = |p: Progress| {
        // A receiver that went away just means nobody is watching.
        let _ = tx.send(GenerationEvent::Progress(p));
    };
    let result = Generator::new(&config)
        .with_cancel_flag(cancel)
        .run(writer, &mut sink);

    let event = match result {
        Ok(bytes) => GenerationEvent::Complete(bytes),
        Err(FolioError::Cancelled) => GenerationEvent::Failed(FolioError::Cancelled),
        Err(e) => {
            log::error!("generation failed: {}", e);
            GenerationEvent::Failed(e)
        }
    };
    let _ = tx.send(event);
}

impl GenerationTask {
    /// Ask the run to stop. It stops before the next page and reports
    /// [`FolioError::Cancelled`]; nothing partial is produced.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn events(&self) -> &Receiver<GenerationEvent> {
        &self.events
    }

    /// Block until the run ends, handing each progress event to `on_progress`.
    ///
    /// A thread that dies without a terminal event yields
    /// [`FolioError::Aborted`].
    pub fn wait_with<F: FnMut(&Progress)>(mut self, mut on_progress: F) -> Result<Vec<u8>, FolioError> {
        let mut outcome = None;
        for event in self.events.iter() {
            match event {
                GenerationEvent::Progress(p) => on_progress(&p),
                GenerationEvent::Complete(bytes) => {
                    outcome = Some(Ok(bytes));
                    break;
                }
                GenerationEvent::Failed(e) => {
                    outcome = Some(Err(e));
                    break;
                }
            }
        }
        let joined = match self.handle.take() {
            Some(handle) => handle.join(),
            None => Ok(()),
        };
        match (outcome, joined) {
            (Some(result), _) => result,
            (None, Err(payload)) => Err(FolioError::Aborted(panic_message(payload.as_ref()))),
            (None, Ok(())) => Err(FolioError::Aborted(
                "generation thread exited without a result".to_string(),
            )),
        }
    }

    /// Block until the run ends.
    pub fn wait(self) -> Result<Vec<u8>, FolioError> {
        self.wait_with(|_| {})
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("generation thread panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("generation thread panicked: {}", s)
    } else {
        "generation thread panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingWriter;

    #[test]
    fn test_task_completes_with_pdf() {
        let mut config = PlannerConfig::for_year(2025);
        config.duration_months = 1;
        let mut seen = 0;
        let bytes = spawn(config).wait_with(|_| seen += 1).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(seen > 0);
    }

    #[test]
    fn test_task_reports_config_error() {
        let mut config = PlannerConfig::for_year(2025);
        config.start_month = 13;
        let err = spawn(config).wait().unwrap_err();
        assert!(matches!(err, FolioError::ConfigError { field: "startMonth", .. }));
    }

    #[test]
    fn test_cancelled_task_produces_nothing() {
        let config = PlannerConfig::for_year(2025);
        let task = spawn(config);
        task.cancel();
        // Cancellation is coarse: a fast run may already be done.
        match task.wait() {
            Err(FolioError::Cancelled) => {}
            Ok(bytes) => assert!(bytes.starts_with(b"%PDF")),
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_panicking_writer_is_not_a_cancellation() {
        let mut config = PlannerConfig::for_year(2025);
        config.duration_months = 1;
        let writer = RecordingWriter {
            panic_on_draw: true,
            ..RecordingWriter::default()
        };
        let err = spawn_with(config, writer).wait().unwrap_err();
        match err {
            FolioError::Aborted(message) => {
                assert!(message.contains("writer crashed while drawing"), "{}", message);
            }
            other => panic!("expected Aborted, got {:?}", other),
        }
    }
}
