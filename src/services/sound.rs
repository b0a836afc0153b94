//! Start and end-of-phase sounds

use std::{
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::FeedbackError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundKind {
    Start,
    End,
}

impl SoundKind {
    fn file_name(self) -> &'static str {
        match self {
            SoundKind::Start => "start.mp3",
            SoundKind::End => "end.mp3",
        }
    }
}

/// Best-effort sound playback; callers log failures and carry on
pub trait SoundPlayer: Send + Sync {
    fn play(&self, kind: SoundKind) -> Result<(), FeedbackError>;
}

/// Plays sound files through the platform's command-line player
#[derive(Debug, Clone)]
pub struct CommandSoundPlayer {
    program: String,
    args: Vec<String>,
    sounds_dir: PathBuf,
}

impl CommandSoundPlayer {
    pub fn new(program: impl Into<String>, args: Vec<String>, sounds_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            sounds_dir: sounds_dir.into(),
        }
    }

    /// Player for the current platform
    pub fn for_platform(sounds_dir: impl Into<PathBuf>) -> Result<Self, FeedbackError> {
        if cfg!(target_os = "macos") {
            Ok(Self::new("afplay", Vec::new(), sounds_dir))
        } else if cfg!(target_os = "windows") {
            Err(FeedbackError::Unsupported("sound playback"))
        } else {
            Ok(Self::new("mpg123", vec!["-q".to_string()], sounds_dir))
        }
    }

    pub fn path(&self, kind: SoundKind) -> PathBuf {
        self.sounds_dir.join(kind.file_name())
    }
}

impl SoundPlayer for CommandSoundPlayer {
    fn play(&self, kind: SoundKind) -> Result<(), FeedbackError> {
        let path = self.path(kind);
        debug!("Playing {:?} sound from {}", kind, path.display());

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| FeedbackError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // The player runs detached; its outcome is only logged.
        let program = self.program.clone();
        tokio::spawn(async move {
            match child.wait_with_output().await {
                Ok(output) if output.status.success() => debug!("{} finished", program),
                Ok(output) => warn!(
                    "Sound playback failed: {}",
                    FeedbackError::Exit {
                        program,
                        code: output.status.code(),
                        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                    }
                ),
                Err(e) => warn!("Failed to wait for {}: {}", program, e),
            }
        });

        Ok(())
    }
}

/// Used when sound is disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSoundPlayer;

impl SoundPlayer for SilentSoundPlayer {
    fn play(&self, kind: SoundKind) -> Result<(), FeedbackError> {
        debug!("Sound disabled, skipping {:?}", kind);
        Ok(())
    }
}

/// Directory holding `start.mp3` and `end.mp3` under a resources root
pub fn sounds_dir(resources: &Path) -> PathBuf {
    resources.join("sounds")
}
