use anyhow::Result;

use crate::model::post::Post;

/// Public demo collection the viewer reads from by default.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

#[derive(Clone)]
pub struct API {
    client: reqwest::Client,
    base_url: String,
}

impl API {
    pub fn new() -> Result<Self> {
        Self::try_with_base_url(DEFAULT_BASE_URL)
    }

    pub fn try_with_base_url(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            anyhow::bail!("base url must not be empty");
        }
        let client = reqwest::Client::builder().build()?;
        Ok(API {
            client,
            base_url: base_url.to_owned(),
        })
    }

    /// GET the whole collection. Non-success statuses are errors, so a
    /// caller never sees a half-valid list.
    pub async fn get_posts(&self) -> Result<Vec<Post>> {
        let url = &self.base_url;
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            anyhow::bail!("GET {} failed with status {}", url, resp.status());
        }
        let posts: Vec<Post> = resp.json().await?;
        Ok(posts)
    }

    /// GET a single record. `post_id` comes straight off the route and is
    /// interpolated verbatim, as text.
    pub async fn get_post(&self, post_id: &str) -> Result<Post> {
        let url = format!("{}/{}", self.base_url, post_id);
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            anyhow::bail!("GET {} failed with status {}", url, resp.status());
        }
        let post: Post = resp.json().await?;
        Ok(post)
    }
}
