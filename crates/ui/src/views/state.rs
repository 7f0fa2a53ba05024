use std::time::Duration;

use dioxus::prelude::*;

const TOAST_VISIBLE_FOR: Duration = Duration::from_millis(3500);

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    id: u64,
    pub text: String,
}

/// Transient, fire-and-forget notification surface. Errors and status
/// messages are shown once and otherwise forgotten; a newer toast replaces
/// the current one.
#[derive(Clone, Copy)]
pub struct Toasts {
    current: Signal<Option<ToastMessage>>,
    next_id: Signal<u64>,
}

impl Toasts {
    pub fn show(&self, text: impl Into<String>) {
        let mut current = self.current;
        let mut next_id = self.next_id;
        let id = next_id() + 1;
        next_id.set(id);
        current.set(Some(ToastMessage {
            id,
            text: text.into(),
        }));
        spawn(async move {
            tokio::time::sleep(TOAST_VISIBLE_FOR).await;
            // Only dismiss if no newer toast replaced this one.
            if current.peek().as_ref().is_some_and(|m| m.id == id) {
                current.set(None);
            }
        });
    }

    #[must_use]
    pub fn current(&self) -> Option<ToastMessage> {
        (self.current)()
    }
}

/// Create the toast signal and put it into context. Call once, at the root.
pub fn provide_toasts() -> Toasts {
    let current = use_signal(|| None);
    let next_id = use_signal(|| 0_u64);
    use_context_provider(|| Toasts { current, next_id })
}

#[must_use]
pub fn use_toasts() -> Toasts {
    use_context::<Toasts>()
}
