//! Speech capture: a thin adapter over an optional continuous
//! speech-to-text capability.
//!
//! The capability is injected as a [`RecognitionBackend`]; when absent the
//! feature is permanently disabled with a visible error, never a crash.
//! Recognition events arrive on a channel and are drained on the UI tick, so
//! all transcript mutation stays on the event loop.

use std::process::Stdio;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Interim lines from a recognizer command carry this prefix; everything else
/// on stdout is a finalized utterance.
const INTERIM_PREFIX: char = '>';

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech recognition is not available (configure [speech] command)")]
    Unavailable,
    #[error("failed to start speech recognition: {0}")]
    Start(String),
}

/// One incremental recognition event from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Best-effort live text; replaces the previous interim wholesale.
    Interim(String),
    /// Finalized text; appended to the accumulated final transcript.
    Final(String),
    /// Backend-reported error; listening is forced off.
    Error(String),
    /// The backend stopped on its own (end of stream).
    Ended,
}

/// A host speech-to-text capability.
///
/// `start` hands the backend a sender for its events; the backend must stop
/// producing once `stop` is called (queued events are discarded regardless).
pub trait RecognitionBackend: Send {
    fn start(
        &mut self,
        events: mpsc::UnboundedSender<RecognitionEvent>,
    ) -> Result<(), SpeechError>;

    fn stop(&mut self);
}

/// Adapter state: transcripts, listening flag, and the last error.
pub struct SpeechCapture {
    backend: Option<Box<dyn RecognitionBackend>>,
    events: Option<mpsc::UnboundedReceiver<RecognitionEvent>>,
    listening: bool,
    interim: String,
    final_transcript: String,
    /// Length of `final_transcript` the consumer has already seen; the
    /// accumulator only grows between resets, so the suffix is the new text.
    observed_len: usize,
    error: Option<String>,
}

impl SpeechCapture {
    #[must_use]
    pub fn new(backend: Option<Box<dyn RecognitionBackend>>) -> Self {
        Self {
            backend,
            events: None,
            listening: false,
            interim: String::new(),
            final_transcript: String::new(),
            observed_len: 0,
            error: None,
        }
    }

    #[must_use]
    pub fn available(&self) -> bool {
        self.backend.is_some()
    }

    #[must_use]
    pub fn listening(&self) -> bool {
        self.listening
    }

    #[must_use]
    pub fn interim_transcript(&self) -> &str {
        &self.interim
    }

    #[must_use]
    pub fn final_transcript(&self) -> &str {
        &self.final_transcript
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// No-op if already listening. Without a backend this records a permanent
    /// capability-unavailable error instead.
    pub fn start(&mut self) {
        if self.listening {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            self.error = Some(SpeechError::Unavailable.to_string());
            return;
        };

        let (tx, rx) = mpsc::unbounded_channel();
        match backend.start(tx) {
            Ok(()) => {
                self.events = Some(rx);
                self.listening = true;
                self.error = None;
                debug!("speech capture started");
            }
            Err(err) => {
                warn!(error = %err, "speech capture failed to start");
                self.error = Some(err.to_string());
            }
        }
    }

    /// No-op if not listening. Queued events are discarded so late callbacks
    /// cannot influence the transcripts.
    pub fn stop(&mut self) {
        if !self.listening {
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            backend.stop();
        }
        self.events = None;
        self.listening = false;
        debug!("speech capture stopped");
    }

    /// Clear both transcript accumulators without touching listening state.
    pub fn reset(&mut self) {
        self.interim.clear();
        self.final_transcript.clear();
        self.observed_len = 0;
    }

    /// Drain pending recognition events into the transcripts. Called once per
    /// UI tick.
    pub fn pump(&mut self) {
        let Some(events) = self.events.as_mut() else {
            return;
        };

        while let Ok(event) = events.try_recv() {
            match event {
                RecognitionEvent::Interim(text) => self.interim = text,
                RecognitionEvent::Final(text) => {
                    self.final_transcript.push_str(&text);
                    self.interim.clear();
                }
                RecognitionEvent::Error(message) => {
                    warn!(error = %message, "speech capture error");
                    self.error = Some(message);
                    self.listening = false;
                }
                RecognitionEvent::Ended => self.listening = false,
            }
        }
    }

    /// Finalized text that arrived since the last call, if any.
    #[must_use]
    pub fn take_new_final(&mut self) -> Option<String> {
        if self.final_transcript.len() <= self.observed_len {
            return None;
        }
        let new_text = self.final_transcript[self.observed_len..].to_string();
        self.observed_len = self.final_transcript.len();
        Some(new_text)
    }
}

/// Recognition backend that runs a user-configured external speech-to-text
/// command and translates its stdout lines into events.
///
/// Protocol: lines prefixed `>` are interim hypotheses; other non-empty
/// lines are finalized utterances (a newline separator is appended so
/// consecutive utterances segment independently). Configured languages are
/// passed as repeated `--language` arguments. The command string is split on
/// whitespace; arguments with embedded spaces are not supported.
pub struct CommandRecognizer {
    command: String,
    languages: Vec<String>,
    child: Option<tokio::process::Child>,
}

impl CommandRecognizer {
    #[must_use]
    pub fn new(command: String, languages: Vec<String>) -> Self {
        Self {
            command,
            languages,
            child: None,
        }
    }
}

impl RecognitionBackend for CommandRecognizer {
    fn start(
        &mut self,
        events: mpsc::UnboundedSender<RecognitionEvent>,
    ) -> Result<(), SpeechError> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| SpeechError::Start("empty speech command".to_string()))?;

        let mut command = tokio::process::Command::new(program);
        command.args(parts);
        for language in &self.languages {
            command.arg("--language").arg(language);
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let mut child = command
            .spawn()
            .map_err(|err| SpeechError::Start(err.to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| SpeechError::Start("speech command has no stdout".to_string()))?;
        self.child = Some(child);

        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        let event = match line.strip_prefix(INTERIM_PREFIX) {
                            Some(interim) => {
                                RecognitionEvent::Interim(interim.trim_start().to_string())
                            }
                            None => RecognitionEvent::Final(format!("{line}\n")),
                        };
                        if events.send(event).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        let _ = events.send(RecognitionEvent::Ended);
                        break;
                    }
                    Err(err) => {
                        let _ = events
                            .send(RecognitionEvent::Error(format!("speech read failed: {err}")));
                        break;
                    }
                }
            }
        });

        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.start_kill();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandRecognizer, RecognitionBackend, RecognitionEvent, SpeechCapture};
    use std::sync::{Arc, Mutex};
    use tokio::sync::mpsc;

    /// Backend test double: exposes its event sender so tests can inject
    /// recognition events, and counts stop calls.
    #[derive(Clone, Default)]
    struct ScriptedBackend {
        shared: Arc<Mutex<ScriptedState>>,
    }

    #[derive(Default)]
    struct ScriptedState {
        sender: Option<mpsc::UnboundedSender<RecognitionEvent>>,
        stop_calls: usize,
    }

    impl ScriptedBackend {
        fn send(&self, event: RecognitionEvent) {
            let state = self.shared.lock().expect("lock");
            state
                .sender
                .as_ref()
                .expect("backend started")
                .send(event)
                .expect("receiver alive");
        }

        fn stop_calls(&self) -> usize {
            self.shared.lock().expect("lock").stop_calls
        }
    }

    impl RecognitionBackend for ScriptedBackend {
        fn start(
            &mut self,
            events: mpsc::UnboundedSender<RecognitionEvent>,
        ) -> Result<(), super::SpeechError> {
            self.shared.lock().expect("lock").sender = Some(events);
            Ok(())
        }

        fn stop(&mut self) {
            self.shared.lock().expect("lock").stop_calls += 1;
        }
    }

    fn captured() -> (SpeechCapture, ScriptedBackend) {
        let backend = ScriptedBackend::default();
        let capture = SpeechCapture::new(Some(Box::new(backend.clone())));
        (capture, backend)
    }

    #[test]
    fn start_without_capability_sets_permanent_error() {
        let mut capture = SpeechCapture::new(None);
        assert!(!capture.available());

        capture.start();
        assert!(!capture.listening());
        assert!(capture.error().is_some());
    }

    #[test]
    fn start_is_a_no_op_while_listening() {
        let (mut capture, _backend) = captured();
        capture.start();
        assert!(capture.listening());
        capture.start();
        assert!(capture.listening());
    }

    #[test]
    fn stop_is_a_no_op_when_not_listening() {
        let (mut capture, backend) = captured();
        capture.stop();
        assert_eq!(backend.stop_calls(), 0);
    }

    #[test]
    fn events_partition_into_interim_and_final() {
        let (mut capture, backend) = captured();
        capture.start();

        backend.send(RecognitionEvent::Interim("call m".to_string()));
        capture.pump();
        assert_eq!(capture.interim_transcript(), "call m");

        // Interim is replaced wholesale, never appended.
        backend.send(RecognitionEvent::Interim("call mo".to_string()));
        capture.pump();
        assert_eq!(capture.interim_transcript(), "call mo");

        backend.send(RecognitionEvent::Final("call mom. ".to_string()));
        backend.send(RecognitionEvent::Final("buy milk.".to_string()));
        capture.pump();
        assert_eq!(capture.final_transcript(), "call mom. buy milk.");
        assert_eq!(capture.interim_transcript(), "");
    }

    #[test]
    fn take_new_final_diffs_against_observed_length() {
        let (mut capture, backend) = captured();
        capture.start();

        backend.send(RecognitionEvent::Final("call mom. ".to_string()));
        capture.pump();
        assert_eq!(capture.take_new_final().as_deref(), Some("call mom. "));
        assert_eq!(capture.take_new_final(), None);

        backend.send(RecognitionEvent::Final("buy milk.".to_string()));
        capture.pump();
        assert_eq!(capture.take_new_final().as_deref(), Some("buy milk."));
    }

    #[test]
    fn backend_error_surfaces_and_stops_listening() {
        let (mut capture, backend) = captured();
        capture.start();

        backend.send(RecognitionEvent::Error("microphone denied".to_string()));
        capture.pump();
        assert!(!capture.listening());
        assert_eq!(capture.error(), Some("microphone denied"));

        // Manual retry is allowed.
        capture.start();
        assert!(capture.listening());
        assert!(capture.error().is_none());
    }

    #[test]
    fn reset_clears_transcripts_but_not_listening() {
        let (mut capture, backend) = captured();
        capture.start();

        backend.send(RecognitionEvent::Interim("mumble".to_string()));
        backend.send(RecognitionEvent::Final("call mom.".to_string()));
        capture.pump();
        let _ = capture.take_new_final();

        capture.reset();
        assert!(capture.listening());
        assert_eq!(capture.interim_transcript(), "");
        assert_eq!(capture.final_transcript(), "");

        // The observed-length diff survives the rewind.
        backend.send(RecognitionEvent::Final("fresh start.".to_string()));
        capture.pump();
        assert_eq!(capture.take_new_final().as_deref(), Some("fresh start."));
    }

    #[test]
    fn stop_discards_queued_events() {
        let (mut capture, backend) = captured();
        capture.start();

        backend.send(RecognitionEvent::Final("late arrival.".to_string()));
        capture.stop();
        assert_eq!(backend.stop_calls(), 1);

        capture.pump();
        assert_eq!(capture.final_transcript(), "");
        assert_eq!(capture.take_new_final(), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_recognizer_translates_stdout_lines() {
        // printf repeats the format per argument: ">one\ntwo\nthree\n".
        let mut backend = CommandRecognizer::new("printf %s\\n >one two three".to_string(), Vec::new());

        let (tx, mut rx) = mpsc::unbounded_channel();
        backend.start(tx).expect("spawn printf");

        assert_eq!(
            rx.recv().await,
            Some(RecognitionEvent::Interim("one".to_string()))
        );
        assert_eq!(
            rx.recv().await,
            Some(RecognitionEvent::Final("two\n".to_string()))
        );
        assert_eq!(
            rx.recv().await,
            Some(RecognitionEvent::Final("three\n".to_string()))
        );
        assert_eq!(rx.recv().await, Some(RecognitionEvent::Ended));
    }
}
