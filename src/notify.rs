/// Kind of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Info,
    Success,
    Error,
}

/// Fire-and-forget feedback sink. Nothing the core does depends on what a
/// notifier does with the message.
pub trait Notifier {
    fn notify(&mut self, message: &str, kind: NotifyKind);
}
