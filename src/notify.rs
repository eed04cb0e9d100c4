#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Success,
    Danger,
}

/// A transient notification shown by the host UI.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub intent: Intent,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Toast {
            message: message.into(),
            intent: Intent::Success,
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Toast {
            message: message.into(),
            intent: Intent::Danger,
        }
    }
}

/// Transient-notification surface. The default implementation logs; hosts
/// plug in their own renderer.
pub trait Toaster: Send + Sync {
    fn show(&self, toast: Toast);
}

pub struct TracingToaster;

impl Toaster for TracingToaster {
    fn show(&self, toast: Toast) {
        match toast.intent {
            Intent::Success => tracing::info!(message = %toast.message, "toast"),
            Intent::Danger => tracing::warn!(message = %toast.message, "toast"),
        }
    }
}
