// Recording mock for the transcoding engine port
//
// Journals every call for order assertions, can fail at a scripted call
// ordinal, and can hold the next exec open so tests can observe a job in
// flight.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::{StitchError, StitchResult};
use crate::ports::TranscodeEnginePort;

/// One recorded engine operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Initialize,
    WriteFile { name: String, bytes: Vec<u8> },
    Exec { args: Vec<String> },
    ReadFile { name: String },
}

#[derive(Default)]
pub struct MockEngineAdapter {
    calls: Mutex<Vec<EngineCall>>,
    files: Mutex<HashMap<String, Vec<u8>>>,
    fail_initialize: AtomicBool,
    fail_at_op: Mutex<Option<usize>>,
    op_count: AtomicUsize,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl MockEngineAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `initialize` fail
    pub fn fail_initialize(&self) {
        self.fail_initialize.store(true, Ordering::SeqCst);
    }

    /// Fail the `ordinal`-th filesystem/exec operation (0-based, counted
    /// across write_file/exec/read_file)
    pub fn fail_at_op(&self, ordinal: usize) {
        *self.fail_at_op.lock().unwrap() = Some(ordinal);
    }

    /// Hold the next `exec` open until the returned handle is notified
    pub fn hold_next_exec(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(Arc::clone(&notify));
        notify
    }

    /// Journal of every call made so far, in order
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls made after (and excluding) `initialize`
    pub fn op_calls(&self) -> Vec<EngineCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, EngineCall::Initialize))
            .collect()
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_op(&self) -> StitchResult<()> {
        let ordinal = self.op_count.fetch_add(1, Ordering::SeqCst);
        if *self.fail_at_op.lock().unwrap() == Some(ordinal) {
            return Err(StitchError::Engine {
                message: format!("injected failure at op {ordinal}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TranscodeEnginePort for MockEngineAdapter {
    async fn initialize(&self) -> StitchResult<()> {
        self.record(EngineCall::Initialize);
        if self.fail_initialize.load(Ordering::SeqCst) {
            return Err(StitchError::Engine {
                message: "injected initialize failure".to_string(),
            });
        }
        Ok(())
    }

    async fn write_file(&self, name: &str, bytes: &[u8]) -> StitchResult<()> {
        self.record(EngineCall::WriteFile {
            name: name.to_string(),
            bytes: bytes.to_vec(),
        });
        self.check_op()?;
        self.files
            .lock()
            .unwrap()
            .insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn exec(&self, args: &[String]) -> StitchResult<()> {
        self.record(EngineCall::Exec {
            args: args.to_vec(),
        });
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.check_op()?;
        // A pass that names an output artifact produces it
        if let Some(out) = args.last() {
            self.files
                .lock()
                .unwrap()
                .insert(out.clone(), format!("mock:{out}").into_bytes());
        }
        Ok(())
    }

    async fn read_file(&self, name: &str) -> StitchResult<Vec<u8>> {
        self.record(EngineCall::ReadFile {
            name: name.to_string(),
        });
        self.check_op()?;
        self.files
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| StitchError::Engine {
                message: format!("no such artifact: {name}"),
            })
    }
}
