use axum::{extract::Extension, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identity providers the sign-in page may offer. Each name is a valid
/// `type` redirect parameter.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthProviders {
    pub providers: Vec<String>,
}

impl AuthProviders {
    /// Parse a comma separated list, dropping blanks and duplicates.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        let mut providers: Vec<String> = Vec::new();
        for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            if !providers.iter().any(|known| known == name) {
                providers.push(name.to_string());
            }
        }
        Self { providers }
    }
}

pub async fn providers(providers: Extension<Arc<AuthProviders>>) -> Json<AuthProviders> {
    Json(providers.0.as_ref().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list() {
        assert_eq!(
            AuthProviders::parse(" google, github ,,google, apple ").providers,
            vec!["google", "github", "apple"]
        );
        assert!(AuthProviders::parse("").providers.is_empty());
    }

    #[tokio::test]
    async fn returns_configured_providers() {
        let configured = Arc::new(AuthProviders::parse("google,github"));
        let Json(body) = providers(Extension(configured)).await;
        assert_eq!(body.providers, vec!["google", "github"]);
    }
}
