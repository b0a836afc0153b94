//! External collaborators module
//!
//! Window and tray host interfaces, icon assets, sound playback and
//! notifications, plus the headless hosts used by the binary.

pub mod console;
pub mod hosts;
pub mod icons;
pub mod notification;
pub mod sound;

// Re-export main types
pub use hosts::{TitleStyle, TrayHost, WindowEvent, WindowHandle, WindowHost};
pub use icons::{IconKey, IconProvider, IconSet, ICON_SIZES, TRAY_ICON_SIZE};
pub use notification::{Notification, NotificationAction, Notifier, SilentNotifier, SystemNotifier};
pub use sound::{CommandSoundPlayer, SilentSoundPlayer, SoundKind, SoundPlayer};
