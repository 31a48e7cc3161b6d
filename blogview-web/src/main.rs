use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::sync::Notify;
use tracing::{info, level_filters::LevelFilter, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use blogview_web::{
    server::{ctx::Args, serve},
    DONE,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Blog viewer for the JSONPlaceholder demo API")]
struct Cli {
    /// Address the pages are served on
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,
    /// Base endpoint of the remote post collection
    #[arg(long, default_value = blogview_api::DEFAULT_BASE_URL)]
    api_base_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_filter(LevelFilter::from_level(Level::INFO)),
        )
        .init();

    let cli = Cli::parse();
    info!("Started with arguments: {cli:?}");
    let Cli { bind, api_base_url } = cli;

    let shutdown = Arc::new(Notify::new());
    let notify = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        info!("Signal handler called");
        DONE.store(true, Ordering::Relaxed);
        notify.notify_waiters();
    })?;

    let args = Args::builder()
        .bind_addr(bind)
        .api_base_url(api_base_url)
        .build()?;
    serve(&args, shutdown).await?;

    info!("Task Exit");
    Ok(())
}
