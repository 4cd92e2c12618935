//! Server-rendered pages. Content and styling live with the design team;
//! these handlers only provide the routes the gate and sign-in flow rely on.

use axum::{
    extract::OriginalUri,
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse},
};
use std::fmt::Write;

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"/_internal/static/site.css\">\n\
         </head>\n<body>\n<main>\n{body}\n</main>\n</body>\n</html>\n"
    ))
}

fn escape(text: &str) -> String {
    text.chars().fold(String::with_capacity(text.len()), |mut acc, ch| {
        match ch {
            '&' => acc.push_str("&amp;"),
            '<' => acc.push_str("&lt;"),
            '>' => acc.push_str("&gt;"),
            '"' => acc.push_str("&quot;"),
            '\'' => acc.push_str("&#39;"),
            _ => acc.push(ch),
        }
        acc
    })
}

pub async fn home() -> impl IntoResponse {
    layout(
        "Welcome",
        "<h1>Welcome</h1>\n<p><a href=\"/signin\">Sign in</a></p>",
    )
}

/// The sign-in page restores `signInFrom`/`signInState` client-side.
pub async fn signin() -> impl IntoResponse {
    layout(
        "Sign in",
        "<h1>Sign in</h1>\n<div id=\"signin\" data-from-key=\"signInFrom\" \
         data-state-key=\"signInState\"></div>",
    )
}

pub async fn privacy() -> impl IntoResponse {
    layout("Privacy Policy", "<h1>Privacy Policy</h1>")
}

pub async fn terms() -> impl IntoResponse {
    layout("Terms of Service", "<h1>Terms of Service</h1>")
}

pub async fn cookies() -> impl IntoResponse {
    layout("Cookie Policy", "<h1>Cookie Policy</h1>")
}

/// Served for every gated path while maintenance is on, under the URL the
/// client requested.
pub async fn maintenance(OriginalUri(original): OriginalUri) -> impl IntoResponse {
    let mut body = String::from(
        "<h1>We'll be back soon</h1>\n<p>The site is down for scheduled maintenance.</p>",
    );
    if original.path() != crate::gate::MAINTENANCE_PATH {
        let _ = write!(
            body,
            "\n<p>Please try <code>{}</code> again shortly.</p>",
            escape(original.path())
        );
    }

    (
        [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))],
        layout("Maintenance", &body),
    )
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        layout("Not found", "<h1>Page not found</h1>"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, http::Uri, response::Response};

    async fn body_text(response: Response) -> anyhow::Result<String> {
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        Ok(String::from_utf8(body.to_vec())?)
    }

    #[test]
    fn escape_html() {
        assert_eq!(
            escape("/a<b>&\"c'"),
            "/a&lt;b&gt;&amp;&quot;c&#39;".to_string()
        );
    }

    #[tokio::test]
    async fn maintenance_mentions_requested_path() -> anyhow::Result<()> {
        let original: Uri = "/pricing?plan=pro".parse()?;
        let response = maintenance(OriginalUri(original)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&HeaderValue::from_static("no-store"))
        );
        let text = body_text(response).await?;
        assert!(text.contains("scheduled maintenance"));
        assert!(text.contains("<code>/pricing</code>"));
        Ok(())
    }

    #[tokio::test]
    async fn maintenance_direct_request() -> anyhow::Result<()> {
        let original: Uri = "/maintenance".parse()?;
        let text = body_text(maintenance(OriginalUri(original)).await.into_response()).await?;

        assert!(!text.contains("<code>"));
        Ok(())
    }

    #[tokio::test]
    async fn not_found_status() {
        assert_eq!(
            not_found().await.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
