//! Tray icon assets

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::{error::FeedbackError, state::Mode};

/// Icon variants the tray can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKey {
    Default,
    Focus,
    Break,
}

impl IconKey {
    pub const ALL: [IconKey; 3] = [IconKey::Default, IconKey::Focus, IconKey::Break];

    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Focus => IconKey::Focus,
            Mode::Break => IconKey::Break,
        }
    }

    fn file_stem(self) -> &'static str {
        match self {
            IconKey::Default => "icon",
            IconKey::Focus => "icon-focus",
            IconKey::Break => "icon-break",
        }
    }
}

/// Pixel sizes the assets are rendered at
pub const ICON_SIZES: [u32; 5] = [16, 32, 128, 256, 512];
/// Size used for the tray itself
pub const TRAY_ICON_SIZE: u32 = 16;

/// Resolves icon keys to image bytes from an asset directory
#[derive(Debug, Clone)]
pub struct IconProvider {
    dir: PathBuf,
}

impl IconProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of an icon asset; the smallest size carries no suffix
    pub fn path(&self, key: IconKey, size: u32) -> PathBuf {
        let name = if size == ICON_SIZES[0] {
            format!("{}.png", key.file_stem())
        } else {
            format!("{}@{}.png", key.file_stem(), size)
        };
        self.dir.join(name)
    }

    /// Read one icon
    pub async fn load(&self, key: IconKey, size: u32) -> Result<Vec<u8>, FeedbackError> {
        read_asset(&self.path(key, size)).await
    }

    /// Read every icon variant at one size; missing variants are logged and skipped
    pub async fn load_set(&self, size: u32) -> IconSet {
        let mut icons = HashMap::new();
        for key in IconKey::ALL {
            match self.load(key, size).await {
                Ok(bytes) => {
                    debug!("Loaded {:?} icon ({} bytes)", key, bytes.len());
                    icons.insert(key, bytes);
                }
                Err(e) => warn!("Icon unavailable, will fall back to default: {}", e),
            }
        }
        IconSet { icons }
    }
}

async fn read_asset(path: &Path) -> Result<Vec<u8>, FeedbackError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| FeedbackError::Asset {
            path: path.display().to_string(),
            source,
        })
}

/// Icons loaded at a single size
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    icons: HashMap<IconKey, Vec<u8>>,
}

impl IconSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: IconKey, bytes: Vec<u8>) -> Self {
        self.icons.insert(key, bytes);
        self
    }

    /// Bytes for a key, falling back to the default icon
    pub fn get(&self, key: IconKey) -> Option<&[u8]> {
        self.icons
            .get(&key)
            .or_else(|| self.icons.get(&IconKey::Default))
            .map(Vec::as_slice)
    }
}
