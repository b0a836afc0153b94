//! Error types shared across the timer, the sync channel and the hosts

use thiserror::Error;

use crate::state::Mode;

/// A message or input rejected at the channel boundary. State is never touched.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid mode: {0:?} (expected \"focus\" or \"break\")")]
    InvalidMode(String),

    #[error("{minutes} min is not an allowed {mode} duration (allowed: {allowed:?})")]
    InvalidDuration {
        mode: Mode,
        minutes: u32,
        allowed: &'static [u32],
    },

    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    #[error("malformed message: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failures reported by the window or tray host.
#[derive(Debug, Error)]
pub enum HostError {
    /// The handle refers to a surface the host already tore down.
    #[error("{0} is no longer alive")]
    Dead(String),

    #[error("host unavailable: {0}")]
    Unavailable(String),
}

/// Best-effort collaborator failures: sound, notifications, icon assets.
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with status {code:?}: {stderr}")]
    Exit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    #[error("asset {path} unavailable: {source}")]
    Asset {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
