use serde_json::Value;
use tracing::debug;

use crate::control::ControlStream;

/// Forwards user interaction events from the browser to the controller.
///
/// Inbound payloads are advisory telemetry: anything that does not parse as
/// a JSON object is dropped without disturbing the connection.
#[derive(Clone)]
pub struct EventRelay {
    control: ControlStream,
}

impl EventRelay {
    pub fn new(control: ControlStream) -> Self {
        Self { control }
    }

    /// Tag an inbound interaction event with the relay marker and emit it as
    /// one control-stream line.
    pub fn on_message(&self, raw: &str) {
        let mut record = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                debug!(payload = %other, "dropping non-object event");
                return;
            }
            Err(e) => {
                debug!(err = %e, "dropping malformed event");
                return;
            }
        };

        // The marker distinguishes relayed events from the server's own
        // control records, so a client-supplied "source" field never
        // survives.
        record.insert("source".to_string(), Value::String("user-event".to_string()));

        self.control.emit(&Value::Object(record));
    }
}
