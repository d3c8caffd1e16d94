use dioxus::prelude::*;

use ui::{ActivityLog, BlogEditor, Notices};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Editor {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .expect("Failed to start the tokio runtime")
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = api::inference::InferenceSettings::from_env();
    if settings.has_token() {
        tracing::info!(
            model = %settings.model(),
            endpoint = %settings.endpoint(),
            "assistant enabled"
        );
    } else {
        tracing::warn!(
            "{} is not set; the writing assistant will be disabled",
            api::inference::TOKEN_VAR
        );
    }

    let router = axum::Router::new().serve_dioxus_application(ServeConfig::new(), App);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    tracing::info!("WriteFlow listening on {}", addr);

    if let Err(e) = axum::serve(listener, router.into_make_service()).await {
        tracing::error!("Server error: {}", e);
    }
}

#[component]
fn App() -> Element {
    use_context_provider(|| Signal::new(ActivityLog::default()));
    use_context_provider(|| Signal::new(Notices::default()));

    rsx! {
        document::Title { "WriteFlow AI" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

#[component]
fn Editor() -> Element {
    rsx! {
        BlogEditor {}
    }
}
