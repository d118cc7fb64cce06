//! Client State
//!
//! Lifecycle tracking for backend resources and the notification sink.

pub mod lifecycle;
pub mod notify;

pub use lifecycle::{Pending, RequestState, Resource, Status, Ticket};
pub use notify::{LoadingToast, Notifier, Toast, ToastCenter, ToastId, ToastVariant};
