use crate::NotifyError;

pub trait Notifier: Send + Sync {
    /// Whether a destination (webhook URL) was supplied at all.
    fn has_destination(&self) -> bool;

    /// # Errors
    ///
    /// Returns `NotifyError::MissingWebhook` if no destination was supplied,
    /// or an error if delivery fails.
    fn send(&self, content: &str) -> Result<(), NotifyError>;
}
