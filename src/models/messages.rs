use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Messages pushed to every connected browser over the WebSocket.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    /// The screen document changed on disk and should be refetched.
    #[serde(rename = "reload")]
    Reload,
}

/// Records emitted on the control stream (stdout) for the controller process,
/// one JSON object per line.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ControlRecord {
    ServerStarted { port: u16, url: String },
    ScreenUpdated { file: PathBuf },
}
