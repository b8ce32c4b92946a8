use serde::Serialize;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Line-delimited JSON writer for the control stream read by the controller
/// process. Stdout carries only these records; diagnostic logging goes to
/// stderr so a line-oriented reader never sees anything but JSON.
#[derive(Clone)]
pub struct ControlStream {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl ControlStream {
    /// Control stream attached to the process's standard output.
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Arc::new(Mutex::new(sink)),
        }
    }

    /// Write `record` as one JSON line and flush it immediately.
    pub fn emit<T: Serialize>(&self, record: &T) {
        let line = match serde_json::to_string(record) {
            Ok(line) => line,
            Err(e) => {
                warn!(err = %e, "failed to serialize control record");
                return;
            }
        };

        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        if let Err(e) = writeln!(sink, "{}", line).and_then(|_| sink.flush()) {
            warn!(err = %e, "failed to write control record");
        }
    }
}
