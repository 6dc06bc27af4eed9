use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::notify::{Notifier, NotifyKind};

/// Most toasts kept at once; older ones are dropped first
const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: NotifyKind,
    expires_at: Instant,
}

/// Short-lived notifications shown in the status row
#[derive(Debug)]
pub struct Toasts {
    queue: VecDeque<Toast>,
    lifetime: Duration,
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Toasts {
            queue: VecDeque::new(),
            lifetime,
        }
    }

    pub fn push_at(&mut self, message: &str, kind: NotifyKind, now: Instant) {
        if self.queue.len() == MAX_TOASTS {
            self.queue.pop_front();
        }
        self.queue.push_back(Toast {
            message: message.to_string(),
            kind,
            expires_at: now + self.lifetime,
        });
    }

    /// Drop expired toasts. Returns true if anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.queue.len();
        self.queue.retain(|t| t.expires_at > now);
        self.queue.len() != before
    }

    /// Newest live toast
    pub fn current(&self) -> Option<&Toast> {
        self.queue.back()
    }

    /// Dismiss the newest toast (Esc in navigate mode)
    pub fn dismiss(&mut self) -> bool {
        self.queue.pop_back().is_some()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, message: &str, kind: NotifyKind) {
        self.push_at(message, kind, Instant::now());
    }
}
