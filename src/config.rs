//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::{Parser, ValueEnum};

use crate::{error::SyncError, state::DurationSettings};

/// Named timing profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// One configured minute lasts 60 seconds
    Production,
    /// One configured minute lasts 1 second, for watching whole cycles quickly
    Development,
}

impl Profile {
    pub fn seconds_per_minute(self) -> u32 {
        match self {
            Profile::Production => 60,
            Profile::Development => 1,
        }
    }
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "bruschetta")]
#[command(about = "A Pomodoro focus timer with a tray mirror")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Timing profile
    #[arg(long, value_enum, default_value = "production")]
    pub profile: Profile,

    /// Initial focus duration in minutes (25, 30, 45, 50 or 55)
    #[arg(long = "focus", default_value = "25")]
    pub focus_minutes: u32,

    /// Initial break duration in minutes (5, 10 or 15)
    #[arg(long = "break", default_value = "5")]
    pub break_minutes: u32,

    /// Directory holding the `icons` and `sounds` assets
    #[arg(long, default_value = "resources")]
    pub resources: PathBuf,

    /// Do not play start and end sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Do not show desktop notifications
    #[arg(long)]
    pub no_notifications: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Validated duration settings
    pub fn durations(&self) -> Result<DurationSettings, SyncError> {
        DurationSettings::new(self.focus_minutes, self.break_minutes)
    }

    pub fn icons_dir(&self) -> PathBuf {
        self.resources.join("icons")
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
