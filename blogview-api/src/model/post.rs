use serde::Deserialize;
use serde::Serialize;

/// One blog entry as served by the remote collection. Immutable once
/// fetched; views keep their own copy for the lifetime of a page render.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u32,
    pub title: String,
    pub body: String,
    pub user_id: u32,
}
