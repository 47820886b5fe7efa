use dioxus::prelude::*;

use crate::config::{MAX_TOASTS, TOAST_DURATION};
use crate::util::generate_id;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Info => "toast toast-info",
            ToastKind::Success => "toast toast-success",
            ToastKind::Warning => "toast toast-warning",
            ToastKind::Error => "toast toast-error",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastKind::Info => "ℹ️",
            ToastKind::Success => "✅",
            ToastKind::Warning => "⚠️",
            ToastKind::Error => "⛔",
        }
    }
}

/// A notification in the bottom-right stack.
#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: String,
    pub kind: ToastKind,
    pub text: String,
}

impl ToastMessage {
    pub fn new(kind: ToastKind, text: impl Into<String>) -> Self {
        Self {
            id: generate_id("toast"),
            kind,
            text: text.into(),
        }
    }
}

/// Appends to the queue, dropping the oldest toast once the queue is full.
pub fn enqueue(queue: &mut Vec<ToastMessage>, message: ToastMessage) {
    if queue.len() >= MAX_TOASTS {
        queue.remove(0);
    }
    queue.push(message);
}

pub fn push_toast(mut toasts: Signal<Vec<ToastMessage>>, kind: ToastKind, text: impl Into<String>) {
    let message = ToastMessage::new(kind, text);
    toasts.with_mut(|queue| enqueue(queue, message));
}

fn dismiss(mut toasts: Signal<Vec<ToastMessage>>, id: &str) {
    toasts.with_mut(|queue| queue.retain(|message| message.id != id));
}

/// Renders the queue held in context. Mounted once at the app root.
#[component]
pub fn Toast() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let queue = toasts.read().clone();
    if queue.is_empty() {
        return rsx! {};
    }

    rsx! {
        div { class: "toast-stack",
            ul {
                for message in queue {
                    ToastCard { key: "{message.id}", message, toasts }
                }
            }
        }
    }
}

#[component]
fn ToastCard(message: ToastMessage, toasts: Signal<Vec<ToastMessage>>) -> Element {
    let id = message.id.clone();
    let _auto_dismiss = use_future(move || {
        let id = id.clone();
        async move {
            tokio::time::sleep(TOAST_DURATION).await;
            dismiss(toasts, &id);
        }
    });

    let close_id = message.id.clone();
    rsx! {
        li { class: "{message.kind.class()}",
            span { class: "toast-icon", "{message.kind.icon()}" }
            p { class: "toast-text", "{message.text}" }
            button {
                class: "toast-close",
                onclick: move |_| dismiss(toasts, &close_id),
                "Schließen"
            }
        }
    }
}
