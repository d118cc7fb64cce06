//! Toast Notifications
//!
//! Transient user-facing messages. Hooks talk to a [`Notifier`]; the
//! [`ToastCenter`] keeps them in memory and can echo them to the terminal.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Identifies one toast so it can be dismissed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(Uuid);

impl ToastId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Loading,
    Success,
    Error,
}

impl ToastVariant {
    pub fn glyph(&self) -> &'static str {
        match self {
            ToastVariant::Loading => "…",
            ToastVariant::Success => "✓",
            ToastVariant::Error => "✕",
        }
    }

    /// How long the toast stays up; loading toasts persist until dismissed
    pub fn lifetime(&self) -> Option<Duration> {
        match self {
            ToastVariant::Loading => None,
            ToastVariant::Success => Some(Duration::milliseconds(3000)),
            ToastVariant::Error => Some(Duration::milliseconds(5000)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub variant: ToastVariant,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub dismissed: bool,
}

impl Toast {
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        if self.dismissed {
            return false;
        }
        match self.variant.lifetime() {
            Some(lifetime) => now < self.created_at + lifetime,
            None => true,
        }
    }
}

/// Sink for user-visible notifications
pub trait Notifier: Send + Sync {
    /// Show a persistent loading toast
    fn loading(&self, message: &str) -> ToastId;

    fn success(&self, message: &str) -> ToastId;

    fn error(&self, message: &str) -> ToastId;

    fn dismiss(&self, id: ToastId);

    fn dismiss_all(&self);
}

/// A loading toast that is dismissed when this handle goes away, whether
/// the request finished or was abandoned
#[must_use = "the toast is dismissed as soon as the handle is dropped"]
pub struct LoadingToast<'a> {
    notifier: &'a dyn Notifier,
    id: ToastId,
}

impl<'a> LoadingToast<'a> {
    pub fn show(notifier: &'a dyn Notifier, message: &str) -> Self {
        let id = notifier.loading(message);
        Self { notifier, id }
    }

    /// Dismiss now
    pub fn dismiss(self) {}
}

impl Drop for LoadingToast<'_> {
    fn drop(&mut self) {
        self.notifier.dismiss(self.id);
    }
}

/// In-memory toast store
#[derive(Debug, Default)]
pub struct ToastCenter {
    toasts: Mutex<Vec<Toast>>,
    echo: bool,
}

impl ToastCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also print every toast to stderr as it appears
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    fn toasts(&self) -> MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, variant: ToastVariant, message: &str) -> ToastId {
        let toast = Toast {
            id: ToastId::new(),
            variant,
            message: message.to_string(),
            created_at: Utc::now(),
            dismissed: false,
        };
        let id = toast.id;

        match variant {
            ToastVariant::Error => tracing::warn!(toast = %message, "Error notification"),
            _ => tracing::info!(toast = %message, "Notification"),
        }
        if self.echo {
            eprintln!("{} {}", variant.glyph(), message);
        }

        self.toasts().push(toast);
        id
    }

    /// Every toast ever shown, oldest first
    pub fn history(&self) -> Vec<Toast> {
        self.toasts().clone()
    }

    /// Toasts still on screen at `now`
    pub fn active_at(&self, now: DateTime<Utc>) -> Vec<Toast> {
        self.toasts()
            .iter()
            .filter(|t| t.is_active_at(now))
            .cloned()
            .collect()
    }

    pub fn active(&self) -> Vec<Toast> {
        self.active_at(Utc::now())
    }

    /// Messages shown with the given variant, oldest first
    pub fn messages(&self, variant: ToastVariant) -> Vec<String> {
        self.toasts()
            .iter()
            .filter(|t| t.variant == variant)
            .map(|t| t.message.clone())
            .collect()
    }
}

impl Notifier for ToastCenter {
    fn loading(&self, message: &str) -> ToastId {
        self.push(ToastVariant::Loading, message)
    }

    fn success(&self, message: &str) -> ToastId {
        self.push(ToastVariant::Success, message)
    }

    fn error(&self, message: &str) -> ToastId {
        self.push(ToastVariant::Error, message)
    }

    fn dismiss(&self, id: ToastId) {
        if let Some(toast) = self.toasts().iter_mut().find(|t| t.id == id) {
            toast.dismissed = true;
        }
    }

    fn dismiss_all(&self) {
        for toast in self.toasts().iter_mut() {
            toast.dismissed = true;
        }
    }
}
