/// The two screens the viewer serves, plus the catch-all. The router owns
/// no state; it only maps a request path onto a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` — the post list.
    List,
    /// `/post/:id` — one post; the id segment is kept verbatim as text.
    Detail(String),
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.split('?').next().unwrap_or(path);
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        match segments.next() {
            None => Route::List,
            Some("post") => match (segments.next(), segments.next()) {
                (Some(id), None) => Route::Detail(id.to_owned()),
                _ => Route::NotFound,
            },
            Some(_) => Route::NotFound,
        }
    }
}
