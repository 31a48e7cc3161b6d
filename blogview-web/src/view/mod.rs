use std::future::Future;

use anyhow::Result;
use askama::Template;
use tokio::sync::Notify;

pub mod detail;
pub mod list;

/// How much of a post body a summary card shows.
pub const BODY_PREVIEW_CHARS: usize = 150;

/// Per-view fetch status. Each view instance owns exactly one of these and
/// never shares it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState<T> {
    #[default]
    Pending,
    Loaded(T),
    Failed(&'static str),
}

impl<T> FetchState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending)
    }
}

/// Detach handle for an in-flight mount. Unmounting while the fetch is
/// outstanding drops the result on the floor; the view state is never
/// written after disposal.
#[derive(Default)]
pub struct Unmount(Notify);

impl Unmount {
    pub fn unmount(&self) {
        // notify_one stores a permit, so unmounting before the race
        // starts still wins it.
        self.0.notify_one();
    }

    async fn wait(&self) {
        self.0.notified().await;
    }
}

/// Race a fetch against its view being unmounted. `None` means the view
/// went away first and the outcome must be discarded.
pub(crate) async fn race_unmount<T>(
    unmount: &Unmount,
    fetch: impl Future<Output = Result<T>>,
) -> Option<Result<T>> {
    tokio::select! {
        biased;
        _ = unmount.wait() => None,
        outcome = fetch => Some(outcome),
    }
}

/// Summary text for a card: the first 150 characters of the body with an
/// ellipsis appended unconditionally, short bodies included, matching the
/// shipped behavior.
pub fn preview(body: &str) -> String {
    let mut out: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
    out.push_str("...");
    out
}

/// A failed view renders this and nothing else.
#[derive(Template)]
#[template(path = "error.html")]
pub(crate) struct ErrorTemplate<'a> {
    pub message: &'a str,
}
