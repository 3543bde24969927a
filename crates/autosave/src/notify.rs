//! User-facing notifications

/// Blocking alert shown to the user
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}
