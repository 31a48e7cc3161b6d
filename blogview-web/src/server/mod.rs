use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::Result;
use askama::Template;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tracing::{info, warn};

use blogview_api::API;

use crate::router::Route;
use crate::view::detail::DetailView;
use crate::view::list::ListView;
use crate::view::{FetchState, Unmount};
use crate::DONE;

pub mod ctx;

const MAX_REQUEST_HEAD: usize = 16 * 1024;

const METHOD_NOT_ALLOWED_PAGE: &str =
    "<!doctype html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>Blog viewer</title></head>\n<body><div>Method not allowed</div></body></html>\n";

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate;

/// Accept loop. One request per connection; each page view builds fresh
/// views, so every navigation fetches anew and nothing is cached.
pub async fn serve(ctx: impl ctx::Context<'_>, shutdown: Arc<Notify>) -> Result<()> {
    let api = API::try_with_base_url(ctx.api_base_url())?;
    let listener = TcpListener::bind(ctx.bind_addr()).await?;
    info!("listening on http://{}", listener.local_addr()?);

    loop {
        if DONE.load(Ordering::Relaxed) {
            break;
        }
        let stream = tokio::select! {
            _ = shutdown.notified() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, _)) => stream,
                Err(err) => {
                    warn!("accept failed: {err}");
                    continue;
                }
            },
        };
        let api = api.clone();
        tokio::spawn(async move {
            if let Err(err) = handle_connection(stream, &api).await {
                warn!("connection error: {err:#}");
            }
        });
    }

    info!("Server Exit");
    Ok(())
}

async fn handle_connection(mut stream: TcpStream, api: &API) -> Result<()> {
    let (method, path) = read_request_head(&mut stream).await?;
    let (status, body) = respond(api, &method, &path).await?;
    info!("{method} {path} -> {status}");

    let head = format!(
        "HTTP/1.1 {status}\r\ncontent-type: text/html; charset=utf-8\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
        body.len()
    );
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(body.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}

async fn read_request_head(stream: &mut TcpStream) -> Result<(String, String)> {
    let mut buf = Vec::with_capacity(1024);
    loop {
        let mut chunk = [0u8; 1024];
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            anyhow::bail!("connection closed before request head completed");
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.len() > MAX_REQUEST_HEAD {
            anyhow::bail!("request head too large");
        }

        let mut headers = [httparse::EMPTY_HEADER; 32];
        let mut req = httparse::Request::new(&mut headers);
        match req.parse(&buf)? {
            httparse::Status::Complete(_) => {
                let method = req.method.unwrap_or("GET").to_owned();
                let path = req.path.unwrap_or("/").to_owned();
                return Ok((method, path));
            }
            httparse::Status::Partial => continue,
        }
    }
}

/// Route dispatch. A failed upstream fetch still yields a complete page
/// (the fixed error message), reported as 502.
async fn respond(api: &API, method: &str, path: &str) -> Result<(&'static str, String)> {
    if method != "GET" {
        return Ok(("405 Method Not Allowed", METHOD_NOT_ALLOWED_PAGE.to_owned()));
    }

    match Route::parse(path) {
        Route::List => {
            let mut view = ListView::new();
            view.mount(api, &Unmount::default()).await;
            let status = page_status(view.state());
            Ok((status, view.render()?))
        }
        Route::Detail(id) => {
            let mut view = DetailView::new(id);
            view.mount(api, &Unmount::default()).await;
            let status = page_status(view.state());
            Ok((status, view.render()?))
        }
        Route::NotFound => Ok(("404 Not Found", NotFoundTemplate.render()?)),
    }
}

fn page_status<T>(state: &FetchState<T>) -> &'static str {
    match state {
        FetchState::Failed(_) => "502 Bad Gateway",
        _ => "200 OK",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::list::FETCH_POSTS_ERROR;

    // nothing listens on the discard port, so every fetch fails fast
    fn unreachable_api() -> API {
        API::try_with_base_url("http://127.0.0.1:9/").expect("api")
    }

    #[tokio::test]
    async fn unknown_route_is_a_404_page() {
        let (status, body) = respond(&unreachable_api(), "GET", "/nope")
            .await
            .expect("respond");
        assert_eq!(status, "404 Not Found");
        assert!(body.contains("Page not found"));
    }

    #[tokio::test]
    async fn non_get_methods_are_rejected() {
        let (status, body) = respond(&unreachable_api(), "POST", "/")
            .await
            .expect("respond");
        assert_eq!(status, "405 Method Not Allowed");
        assert!(body.contains("Method not allowed"));
    }

    #[tokio::test]
    async fn unreachable_upstream_renders_the_fixed_list_error() {
        let (status, body) = respond(&unreachable_api(), "GET", "/")
            .await
            .expect("respond");
        assert_eq!(status, "502 Bad Gateway");
        assert!(body.contains(FETCH_POSTS_ERROR));
    }

    #[tokio::test]
    async fn detail_route_passes_the_id_through_to_the_fetch() {
        use crate::view::detail::FETCH_POST_ERROR;

        let (status, body) = respond(&unreachable_api(), "GET", "/post/5")
            .await
            .expect("respond");
        assert_eq!(status, "502 Bad Gateway");
        assert!(body.contains(FETCH_POST_ERROR));
    }
}
