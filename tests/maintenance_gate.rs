use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
};
use frontgate::{
    gate::{EnvFlag, FixedFlag, FlagSource},
    site::{self, handlers::AuthProviders, SiteConfig},
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tower::ServiceExt;

struct ToggleFlag(AtomicBool);

impl FlagSource for ToggleFlag {
    fn read(&self) -> Option<String> {
        Some(self.0.load(Ordering::SeqCst).to_string())
    }
}

fn config() -> SiteConfig {
    SiteConfig {
        auth_providers: AuthProviders::parse("google,github"),
        assets_dir: None,
    }
}

async fn get(flag: Arc<dyn FlagSource>, uri: &str) -> Result<Response> {
    let app = site::app(&config(), flag)?;
    let request = Request::builder().uri(uri).body(Body::empty())?;
    Ok(app.oneshot(request).await?)
}

async fn text(response: Response) -> Result<String> {
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(body.to_vec())?)
}

fn is_maintenance_page(body: &str) -> bool {
    body.contains("scheduled maintenance")
}

#[tokio::test]
async fn enabled_flag_serves_maintenance_for_every_page() -> Result<()> {
    let flag: Arc<dyn FlagSource> = Arc::new(FixedFlag::enabled());

    for uri in ["/", "/signin?type=google&state=abc123", "/terms", "/nope"] {
        let response = get(flag.clone(), uri).await?;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert!(response.headers().get(header::LOCATION).is_none());
        assert!(is_maintenance_page(&text(response).await?), "{uri}");
    }
    Ok(())
}

#[tokio::test]
async fn rewrite_is_not_a_redirect() -> Result<()> {
    let flag: Arc<dyn FlagSource> = Arc::new(FixedFlag::enabled());

    let response = get(flag, "/privacy?ref=footer").await?;

    assert!(!response.status().is_redirection());
    assert_eq!(
        response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok()),
        Some("no-store")
    );
    assert!(text(response).await?.contains("<code>/privacy</code>"));
    Ok(())
}

#[tokio::test]
async fn excluded_paths_ignore_the_flag() -> Result<()> {
    for raw in [Some("true"), Some("garbage"), None] {
        let flag: Arc<dyn FlagSource> = Arc::new(FixedFlag(raw.map(str::to_string)));

        let response = get(flag.clone(), "/api/auth/providers").await?;
        assert_eq!(response.status(), StatusCode::OK);
        let providers: AuthProviders = serde_json::from_str(&text(response).await?)?;
        assert_eq!(providers.providers, vec!["google", "github"]);

        let response = get(flag.clone(), "/_internal/health").await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!is_maintenance_page(&text(response).await?));

        // unknown excluded paths reach normal routing, i.e. the 404 page
        let response = get(flag, "/_internal/static/missing.css").await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
    Ok(())
}

#[tokio::test]
async fn disabled_flag_passes_through() -> Result<()> {
    for raw in [None, Some("false"), Some("True"), Some("1"), Some("")] {
        let flag: Arc<dyn FlagSource> = Arc::new(FixedFlag(raw.map(str::to_string)));

        let response = get(flag.clone(), "/terms").await?;
        assert_eq!(response.status(), StatusCode::OK);
        let body = text(response).await?;
        assert!(body.contains("Terms of Service"), "{raw:?}");
        assert!(!is_maintenance_page(&body));

        let response = get(flag, "/nope").await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
    Ok(())
}

#[tokio::test]
async fn flag_is_read_per_request() -> Result<()> {
    let toggle = Arc::new(ToggleFlag(AtomicBool::new(false)));
    let app = site::app(&config(), toggle.clone())?;

    let request = Request::builder().uri("/").body(Body::empty())?;
    let body = text(app.clone().oneshot(request).await?).await?;
    assert!(!is_maintenance_page(&body));

    toggle.0.store(true, Ordering::SeqCst);

    let request = Request::builder().uri("/").body(Body::empty())?;
    let body = text(app.clone().oneshot(request).await?).await?;
    assert!(is_maintenance_page(&body));

    toggle.0.store(false, Ordering::SeqCst);

    let request = Request::builder().uri("/").body(Body::empty())?;
    let body = text(app.oneshot(request).await?).await?;
    assert!(!is_maintenance_page(&body));
    Ok(())
}

#[tokio::test]
async fn env_flag_drives_the_gate() -> Result<()> {
    let flag: Arc<dyn FlagSource> = Arc::new(EnvFlag::new("FRONTGATE_TEST_GATE_MAINTENANCE"));
    let app = site::app(&config(), flag)?;

    std::env::set_var("FRONTGATE_TEST_GATE_MAINTENANCE", "true");
    let request = Request::builder().uri("/").body(Body::empty())?;
    let enabled = text(app.clone().oneshot(request).await?).await?;

    std::env::remove_var("FRONTGATE_TEST_GATE_MAINTENANCE");
    let request = Request::builder().uri("/").body(Body::empty())?;
    let disabled = text(app.oneshot(request).await?).await?;

    assert!(is_maintenance_page(&enabled));
    assert!(!is_maintenance_page(&disabled));
    Ok(())
}

#[tokio::test]
async fn request_id_is_set() -> Result<()> {
    let flag: Arc<dyn FlagSource> = Arc::new(FixedFlag::default());

    let response = get(flag, "/").await?;

    assert!(response.headers().get("x-request-id").is_some());
    Ok(())
}
