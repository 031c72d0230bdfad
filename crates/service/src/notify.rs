use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// A transient notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub variant: ToastVariant,
    pub title: String,
    pub description: Option<String>,
}

impl Toast {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            variant: ToastVariant::Default,
            title: title.into(),
            description: None,
        }
    }

    pub fn destructive(title: impl Into<String>) -> Self {
        Self {
            variant: ToastVariant::Destructive,
            ..Self::new(title)
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_destructive() {
            write!(f, "[!] ")?;
        }
        write!(f, "{}", self.title)?;
        if let Some(description) = &self.description {
            write!(f, ": {}", description)?;
        }
        Ok(())
    }
}

/// Toasts kept waiting for a reader before the oldest are dropped.
pub const TOAST_CAPACITY: usize = 64;

/// Sending half of the toast queue. Cheap to clone.
///
/// The queue is bounded. When it is full the oldest waiting toast is
///  discarded to make room, so a reader that never drains it costs at
///  most `capacity` toasts.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: flume::Sender<Toast>,
    // evicts from the front when full
    overflow: flume::Receiver<Toast>,
}

impl Notifier {
    pub fn channel() -> (Self, flume::Receiver<Toast>) {
        Self::bounded(TOAST_CAPACITY)
    }

    pub fn bounded(capacity: usize) -> (Self, flume::Receiver<Toast>) {
        let (sender, receiver) = flume::bounded(capacity.max(1));
        let notifier = Self {
            sender,
            overflow: receiver.clone(),
        };
        (notifier, receiver)
    }

    pub fn notify(&self, toast: Toast) {
        if toast.is_destructive() {
            tracing::warn!(title = %toast.title, description = ?toast.description, "toast");
        } else {
            tracing::info!(title = %toast.title, description = ?toast.description, "toast");
        }

        let toast = match self.sender.try_send(toast) {
            Ok(()) => return,
            Err(flume::TrySendError::Full(toast)) => toast,
            Err(flume::TrySendError::Disconnected(_)) => return,
        };

        if let Ok(stale) = self.overflow.try_recv() {
            tracing::debug!(title = %stale.title, "toast queue full, dropped oldest");
        }
        if self.sender.try_send(toast).is_err() {
            tracing::debug!("toast dropped, queue still full");
        }
    }
}
