use super::Error;
use regex::Regex;

/// Framework-internal assets and probes.
pub const INTERNAL_PREFIX: &str = "/_internal";

/// Authentication API namespace.
pub const AUTH_API_PREFIX: &str = "/api/auth";

pub const DEFAULT_EXCLUSIONS: [&str; 2] = [INTERNAL_PREFIX, AUTH_API_PREFIX];

/// Paths that bypass the gate entirely.
///
/// Matching is by raw prefix, so `/api/authorize` is excluded as well as
/// `/api/auth/session`.
#[derive(Debug, Clone)]
pub struct ExclusionMatcher {
    pattern: Regex,
}

impl ExclusionMatcher {
    /// Build a matcher from path prefixes.
    ///
    /// # Errors
    /// Returns an error if a prefix is empty or does not start with `/`.
    pub fn new<I, P>(prefixes: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let mut alternatives = Vec::new();
        for prefix in prefixes {
            let prefix = prefix.as_ref();
            if prefix.len() < 2 || !prefix.starts_with('/') {
                return Err(Error::InvalidPrefix(prefix.to_string()));
            }
            alternatives.push(regex::escape(prefix));
        }

        if alternatives.is_empty() {
            return Err(Error::NoExclusions);
        }

        let pattern = Regex::new(&format!("^(?:{})", alternatives.join("|")))?;

        Ok(Self { pattern })
    }

    /// The `/_internal` and `/api/auth` exclusions.
    ///
    /// # Errors
    /// Returns an error if the pattern fails to compile.
    pub fn standard() -> Result<Self, Error> {
        Self::new(DEFAULT_EXCLUSIONS)
    }

    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}
