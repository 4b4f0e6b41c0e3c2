// ── Notification feedback ──
//
// Every orchestrator outcome surfaces as a Notice on a broadcast channel.
// Rendering (banner, toast, inline) is external.

use tokio::sync::broadcast;
use tracing::trace;

const NOTICE_CHANNEL_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-visible status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub(crate) struct NoticeBoard {
    tx: broadcast::Sender<Notice>,
}

impl NoticeBoard {
    pub(crate) fn new() -> Self {
        let (tx, _) = broadcast::channel(NOTICE_CHANNEL_SIZE);
        Self { tx }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    /// Publish a notice. Dropped silently when nothing is listening.
    pub(crate) fn publish(&self, notice: Notice) {
        trace!(level = ?notice.level, message = %notice.message, "notice");
        let _ = self.tx.send(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_receive_published_notices() {
        let board = NoticeBoard::new();
        let mut rx = board.subscribe();

        board.publish(Notice::success("Client added successfully!"));

        let notice = rx.try_recv().expect("notice delivered");
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, "Client added successfully!");
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let board = NoticeBoard::new();
        board.publish(Notice::error("nobody listening"));
    }
}
