//! # Frontgate
//!
//! `frontgate` serves the account front-end and guards every navigation at two
//! points:
//!
//! 1. **Edge Gate** ([`gate`]): runs per request, before routing. When the
//!    maintenance flag reads exactly `"true"` the request is rewritten (not
//!    redirected) to `/maintenance`. Framework-internal paths (`/_internal`) and
//!    the auth API namespace (`/api/auth`) are never gated.
//! 2. **Auth Param Capture** ([`capture`]): runs in the client once the router
//!    has resolved the query. It copies the identity-provider `type` and `state`
//!    redirect parameters into client-local storage (`signInFrom`,
//!    `signInState`) so the sign-in page can restore the provider context.
//!
//! The two never call each other; they both sit around the same navigation.
//!
//! ## Failure model
//!
//! - A missing or malformed maintenance flag means "disabled". The gate fails
//!   open to normal service.
//! - A repeated `type` or `state` key clears the persisted selection instead of
//!   guessing which occurrence is authoritative.

pub mod capture;
pub mod cli;
pub mod gate;
pub mod site;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
