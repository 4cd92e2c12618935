//! Edge Gate: per-request maintenance-mode routing.
//!
//! The gate sees every request before routing. Excluded paths go straight
//! through. For everything else the maintenance flag is read fresh and, when
//! enabled, the request URI path is swapped for [`MAINTENANCE_PATH`]. Query,
//! scheme and authority are kept, and the client never sees a redirect.

use axum::http::{
    uri::{InvalidUri, InvalidUriParts, PathAndQuery},
    Uri,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace, warn};

pub mod flag;
pub mod layer;
pub mod matcher;

pub use self::flag::{EnvFlag, FixedFlag, FlagSource, MaintenanceFlag};
pub use self::layer::{MaintenanceLayer, MaintenanceService};
pub use self::matcher::ExclusionMatcher;

/// Page served in place of every gated path while maintenance is on.
pub const MAINTENANCE_PATH: &str = "/maintenance";

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid exclusion prefix: {0:?}")]
    InvalidPrefix(String),
    #[error("at least one exclusion prefix is required")]
    NoExclusions,
    #[error("invalid exclusion pattern")]
    Pattern(#[from] regex::Error),
    #[error("invalid rewrite target")]
    Target(#[from] InvalidUri),
    #[error("invalid rewritten uri")]
    Parts(#[from] InvalidUriParts),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    PassThrough,
    Rewrite(Uri),
}

#[derive(Clone)]
pub struct MaintenanceGate {
    flag: Arc<dyn FlagSource>,
    exclusions: ExclusionMatcher,
}

impl MaintenanceGate {
    #[must_use]
    pub fn new(flag: Arc<dyn FlagSource>, exclusions: ExclusionMatcher) -> Self {
        Self { flag, exclusions }
    }

    /// Gate with the standard exclusions.
    ///
    /// # Errors
    /// Returns an error if the exclusion matcher cannot be built.
    pub fn standard(flag: Arc<dyn FlagSource>) -> Result<Self, Error> {
        Ok(Self::new(flag, ExclusionMatcher::standard()?))
    }

    /// Decide what to do with a request for `uri`.
    ///
    /// Excluded paths never read the flag.
    #[must_use]
    pub fn evaluate(&self, uri: &Uri) -> GateDecision {
        let path = uri.path();

        if self.exclusions.is_excluded(path) {
            trace!(path, "excluded from maintenance gate");
            return GateDecision::PassThrough;
        }

        if !self.flag.flag().is_enabled() {
            return GateDecision::PassThrough;
        }

        match rewrite_uri(uri) {
            Ok(rewritten) => {
                debug!(path, rewritten = %rewritten, "maintenance rewrite");
                GateDecision::Rewrite(rewritten)
            }
            Err(err) => {
                // fail open
                warn!(path, "could not build maintenance uri: {}", err);
                GateDecision::PassThrough
            }
        }
    }
}

fn rewrite_uri(uri: &Uri) -> Result<Uri, Error> {
    let target = match uri.query() {
        Some(query) => format!("{MAINTENANCE_PATH}?{query}"),
        None => MAINTENANCE_PATH.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(target)?);

    Ok(Uri::from_parts(parts)?)
}
