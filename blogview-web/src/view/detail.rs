use anyhow::Result;
use askama::Template;
use tracing::warn;

use blogview_api::model::post::Post;
use blogview_api::API;

use crate::theme::Theme;

use super::{race_unmount, ErrorTemplate, FetchState, Unmount};

pub const FETCH_POST_ERROR: &str = "Failed to fetch post";

#[derive(Template)]
#[template(path = "detail.html")]
struct DetailTemplate<'a> {
    post: &'a Post,
    theme: Theme,
}

#[derive(Template)]
#[template(path = "loading.html")]
struct LoadingTemplate;

/// The `/post/:id` screen: one fetch for the routed identifier, full body,
/// no truncation.
pub struct DetailView {
    post_id: String,
    state: FetchState<Post>,
}

impl DetailView {
    pub fn new(post_id: impl Into<String>) -> Self {
        DetailView {
            post_id: post_id.into(),
            state: FetchState::Pending,
        }
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    /// Issues the single-post fetch exactly once per identifier.
    pub async fn mount(&mut self, api: &API, unmount: &Unmount) {
        if !self.state.is_pending() {
            return;
        }
        if let Some(outcome) = race_unmount(unmount, api.get_post(&self.post_id)).await {
            self.apply(outcome);
        }
    }

    /// Route-parameter change. A new identifier re-arms the fetch; the
    /// same identifier keeps whatever already resolved.
    pub fn navigate(&mut self, post_id: impl Into<String>) {
        let post_id = post_id.into();
        if post_id != self.post_id {
            self.post_id = post_id;
            self.state = FetchState::Pending;
        }
    }

    pub(crate) fn apply(&mut self, outcome: Result<Post>) {
        self.state = match outcome {
            Ok(post) => FetchState::Loaded(post),
            Err(err) => {
                warn!("detail fetch for post {} failed: {err:#}", self.post_id);
                FetchState::Failed(FETCH_POST_ERROR)
            }
        };
    }

    pub fn state(&self) -> &FetchState<Post> {
        &self.state
    }

    pub fn render(&self) -> Result<String> {
        let page = match &self.state {
            FetchState::Failed(message) => ErrorTemplate { message }.render()?,
            FetchState::Pending => LoadingTemplate.render()?,
            FetchState::Loaded(post) => DetailTemplate {
                post,
                theme: Theme::default(),
            }
            .render()?,
        };
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_view(title: &str, body: &str) -> DetailView {
        let mut view = DetailView::new("5");
        view.apply(Ok(Post {
            id: 5,
            title: title.into(),
            body: body.into(),
            user_id: 2,
        }));
        view
    }

    #[test]
    fn renders_exact_title_and_body() {
        let body = "z".repeat(400);
        let view = loaded_view("Exact Title", &body);
        let page = view.render().expect("render");
        assert!(page.contains("Exact Title"));
        // full body, untruncated
        assert!(page.contains(&body));
    }

    #[test]
    fn failure_renders_only_the_fixed_message() {
        let mut view = DetailView::new("5");
        view.apply(Err(anyhow::anyhow!("GET .../5 failed with status 404")));

        let page = view.render().expect("render");
        assert!(page.contains(FETCH_POST_ERROR));
        assert!(!page.contains("404"));
        assert!(!page.contains("Random Title"));
    }

    #[test]
    fn pending_renders_the_loading_placeholder() {
        let view = DetailView::new("5");
        let page = view.render().expect("render");
        assert!(page.contains("Loading..."));
        assert!(!page.contains("Random Title"));
    }

    #[test]
    fn navigate_to_a_new_id_rearms_the_fetch() {
        let mut view = loaded_view("T", "B");
        view.navigate("6");
        assert_eq!(view.post_id(), "6");
        assert!(view.state().is_pending());
    }

    #[test]
    fn navigate_to_the_same_id_keeps_the_state() {
        let mut view = loaded_view("T", "B");
        view.navigate("5");
        assert!(matches!(view.state(), FetchState::Loaded(_)));
    }

    #[tokio::test]
    async fn mount_on_a_resolved_view_does_not_refetch() {
        let api = API::try_with_base_url("http://127.0.0.1:9/").expect("api");
        let unmount = Unmount::default();

        let mut view = loaded_view("T", "B");
        view.mount(&api, &unmount).await;

        assert!(matches!(view.state(), FetchState::Loaded(post) if post.title == "T"));
    }

    #[tokio::test]
    async fn unmounting_first_leaves_the_state_pending() {
        let api = API::try_with_base_url("http://127.0.0.1:9/").expect("api");
        let unmount = Unmount::default();
        unmount.unmount();

        let mut view = DetailView::new("5");
        view.mount(&api, &unmount).await;

        assert!(view.state().is_pending());
    }
}
