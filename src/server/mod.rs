//! Local server: serves the generated site and accepts newsletter sign-ups

use anyhow::Result;
use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse},
    routing::post,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::newsletter::{NewsletterDialog, NewsletterPort, SubscriberList};
use crate::helpers::is_external;
use crate::render::components::{newsletter_action, newsletter_dialog_body};
use crate::Blog;

/// Server state
struct ServerState {
    config: SiteConfig,
    subscribers: Arc<dyn NewsletterPort>,
}

/// Newsletter form body
#[derive(Debug, Deserialize)]
struct NewsletterForm {
    #[serde(default)]
    email: String,
}

/// Build the router for a site
pub fn router(blog: &Blog, subscribers: Arc<dyn NewsletterPort>) -> Router {
    let state = Arc::new(ServerState {
        config: blog.config.clone(),
        subscribers,
    });

    // Same path the rendered form posts to, always rooted at `/`
    let action = newsletter_action(&blog.config);
    let mut app = Router::new();
    if is_external(&action) {
        tracing::info!("Newsletter form posts to {}, not handled locally", action);
    } else {
        app = app.route(&action, post(newsletter_handler));
    }

    app.fallback_service(ServeDir::new(&blog.public_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let subscribers = SubscriberList::open(blog.subscribers_path())?;
    let app = router(blog, Arc::new(subscribers));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run a submit through the dialog and answer with the dialog body it ends in
async fn newsletter_handler(
    State(state): State<Arc<ServerState>>,
    Form(form): Form<NewsletterForm>,
) -> impl IntoResponse {
    let mut dialog = NewsletterDialog::new();
    dialog.activate();
    let outcome = dialog.submit(&form.email, state.subscribers.as_ref());
    tracing::debug!("Newsletter submit: {:?}", outcome);

    Html(newsletter_dialog_body(&state.config, dialog.state()))
}
