use axum::http::Uri;
use std::collections::BTreeMap;
use url::form_urlencoded;

/// One query parameter as the client router exposes it: a key seen once is a
/// string, a repeated key is a list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    Multiple(Vec<String>),
}

impl QueryValue {
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multiple(_) => None,
        }
    }

    #[must_use]
    pub fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }

    fn push(&mut self, value: String) {
        match self {
            Self::Single(first) => {
                let first = std::mem::take(first);
                *self = Self::Multiple(vec![first, value]);
            }
            Self::Multiple(values) => values.push(value),
        }
    }
}

/// Decoded query of the current route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteQuery {
    params: BTreeMap<String, QueryValue>,
}

impl RouteQuery {
    /// Form-decode a raw query string (without the leading `?`).
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut params: BTreeMap<String, QueryValue> = BTreeMap::new();

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let value = value.into_owned();
            match params.get_mut(key.as_ref()) {
                Some(existing) => existing.push(value),
                None => {
                    params.insert(key.into_owned(), QueryValue::Single(value));
                }
            }
        }

        Self { params }
    }

    #[must_use]
    pub fn from_uri(uri: &Uri) -> Self {
        uri.query().map(Self::parse).unwrap_or_default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.params.get(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_and_repeated_keys() {
        let query = RouteQuery::parse("type=a&state=s1&type=b&type=c");

        assert_eq!(
            query.get("type"),
            Some(&QueryValue::Multiple(vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string()
            ]))
        );
        assert_eq!(query.get("state").and_then(QueryValue::as_single), Some("s1"));
        assert_eq!(query.get("missing"), None);
    }

    #[test]
    fn decodes_values() {
        let query = RouteQuery::parse("state=a%2Fb+c&type=git%20hub");

        assert_eq!(query.get("state").and_then(QueryValue::as_single), Some("a/b c"));
        assert_eq!(query.get("type").and_then(QueryValue::as_single), Some("git hub"));
    }

    #[test]
    fn from_uri_without_query() -> anyhow::Result<()> {
        let uri: Uri = "/signin".parse()?;
        assert!(RouteQuery::from_uri(&uri).is_empty());

        let uri: Uri = "/signin?type=google".parse()?;
        assert_eq!(
            RouteQuery::from_uri(&uri).get("type"),
            Some(&QueryValue::Single("google".to_string()))
        );
        Ok(())
    }
}
