//! Transient user notifications
//!
//! The viewer reports initialization success or failure through a
//! fire-and-forget notifier; nothing is returned and nothing is awaited.

use log::{error, info, warn};

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Receiver of toast-style notices
pub trait Notifier {
    /// Show a notice to the user
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Notifier that writes notices to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Success | NoticeLevel::Info => info!("{}", message),
            NoticeLevel::Warning => warn!("{}", message),
            NoticeLevel::Error => error!("{}", message),
        }
    }
}
