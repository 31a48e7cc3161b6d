use anyhow::Result;
use askama::Template;
use tracing::warn;

use blogview_api::model::post::Post;
use blogview_api::API;

use crate::theme::Theme;

use super::{preview, race_unmount, ErrorTemplate, FetchState, Unmount};

pub const FETCH_POSTS_ERROR: &str = "Failed to fetch posts";

struct PostCard {
    id: u32,
    title: String,
    summary: String,
}

#[derive(Template)]
#[template(path = "list.html")]
struct ListTemplate<'a> {
    cards: &'a [PostCard],
    theme: Theme,
}

/// The `/` screen: one fetch of the whole collection on mount, then a grid
/// of summary cards.
#[derive(Default)]
pub struct ListView {
    state: FetchState<Vec<Post>>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the collection fetch exactly once; mounting an already
    /// resolved view does nothing.
    pub async fn mount(&mut self, api: &API, unmount: &Unmount) {
        if !self.state.is_pending() {
            return;
        }
        if let Some(outcome) = race_unmount(unmount, api.get_posts()).await {
            self.apply(outcome);
        }
    }

    pub(crate) fn apply(&mut self, outcome: Result<Vec<Post>>) {
        self.state = match outcome {
            Ok(posts) => FetchState::Loaded(posts),
            Err(err) => {
                warn!("list fetch failed: {err:#}");
                FetchState::Failed(FETCH_POSTS_ERROR)
            }
        };
    }

    pub fn state(&self) -> &FetchState<Vec<Post>> {
        &self.state
    }

    pub fn render(&self) -> Result<String> {
        let page = match &self.state {
            FetchState::Failed(message) => ErrorTemplate { message }.render()?,
            // Pending shows the chrome with no cards and no spinner.
            FetchState::Pending => ListTemplate {
                cards: &[],
                theme: Theme::default(),
            }
            .render()?,
            FetchState::Loaded(posts) => {
                let cards: Vec<PostCard> = posts
                    .iter()
                    .map(|post| PostCard {
                        id: post.id,
                        title: post.title.clone(),
                        summary: preview(&post.body),
                    })
                    .collect();
                ListTemplate {
                    cards: &cards,
                    theme: Theme::default(),
                }
                .render()?
            }
        };
        Ok(page)
    }
}
