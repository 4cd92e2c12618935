//! Auth Param Capture: persist identity-provider redirect parameters.
//!
//! An identity provider sends the user back with `?type=<provider>&state=<token>`.
//! Once the client router has resolved the query, [`capture`] copies those
//! values into client-local storage under [`SIGN_IN_FROM_KEY`] and
//! [`SIGN_IN_STATE_KEY`]. The sign-in page later reads them back through
//! [`PersistedAuthSelection::restore`].
//!
//! Storage always reflects the most recent evaluated navigation only:
//!
//! | `type`          | `state`         | `signInFrom` | `signInState` |
//! |-----------------|-----------------|--------------|---------------|
//! | absent          | any             | removed      | removed       |
//! | repeated        | any             | removed      | removed       |
//! | any             | repeated        | removed      | removed       |
//! | single          | absent          | set          | removed       |
//! | single          | single          | set          | set           |
//!
//! An empty value (`?type=`) counts as absent.

use tracing::debug;

pub mod query;
pub mod storage;

pub use self::query::{QueryValue, RouteQuery};
pub use self::storage::{MemoryStorage, Storage};

#[cfg(target_arch = "wasm32")]
pub use self::storage::BrowserStorage;

pub const SIGN_IN_FROM_KEY: &str = "signInFrom";
pub const SIGN_IN_STATE_KEY: &str = "signInState";

pub const TYPE_PARAM: &str = "type";
pub const STATE_PARAM: &str = "state";

/// Whether the client router has fully resolved the current route's query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteReadiness {
    Pending,
    Ready,
}

impl From<bool> for RouteReadiness {
    fn from(ready: bool) -> Self {
        if ready {
            Self::Ready
        } else {
            Self::Pending
        }
    }
}

/// The raw `type`/`state` parameters of one navigation, unvalidated.
///
/// Callers that need the validated form must use
/// [`PersistedAuthSelection::restore`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthRedirectParams {
    pub provider_type: Option<QueryValue>,
    pub state: Option<QueryValue>,
}

impl AuthRedirectParams {
    #[must_use]
    pub fn from_query(query: &RouteQuery) -> Self {
        Self {
            provider_type: query.get(TYPE_PARAM).cloned(),
            state: query.get(STATE_PARAM).cloned(),
        }
    }
}

/// What the sign-in page finds in storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedAuthSelection {
    pub provider_type: Option<String>,
    pub state: Option<String>,
}

impl PersistedAuthSelection {
    pub fn restore<S: Storage + ?Sized>(storage: &S) -> Self {
        Self {
            provider_type: storage.get_item(SIGN_IN_FROM_KEY),
            state: storage.get_item(SIGN_IN_STATE_KEY),
        }
    }
}

/// Evaluate one navigation and update `storage`.
///
/// Storage is left alone entirely while `readiness` is `Pending`. The raw
/// parameters are returned either way.
pub fn capture<S: Storage + ?Sized>(
    readiness: RouteReadiness,
    query: &RouteQuery,
    storage: &mut S,
) -> AuthRedirectParams {
    let params = AuthRedirectParams::from_query(query);

    if readiness == RouteReadiness::Pending {
        return params;
    }

    let provider_type = present(params.provider_type.as_ref());
    let state = present(params.state.as_ref());

    let Some(provider_type) = provider_type else {
        debug!("no provider_type in query, clearing sign-in selection");
        clear(storage);
        return params;
    };

    let (Some(provider_type), Some(state)) = (provider_type.as_single(), single_or_absent(state))
    else {
        debug!("repeated provider_type or state in query, clearing sign-in selection");
        clear(storage);
        return params;
    };

    debug!(provider_type, "storing sign-in provider_type");
    storage.set_item(SIGN_IN_FROM_KEY, provider_type);

    match state {
        Some(state) => {
            debug!(state, "storing sign-in state");
            storage.set_item(SIGN_IN_STATE_KEY, state);
        }
        None => {
            debug!("no state in query, clearing sign-in state");
            storage.remove_item(SIGN_IN_STATE_KEY);
        }
    }

    params
}

/// Treat an empty single value as absent.
fn present(value: Option<&QueryValue>) -> Option<&QueryValue> {
    value.filter(|value| value.as_single() != Some(""))
}

/// `Some(None)` for an absent state, `Some(Some(_))` for a single one and
/// `None` for a repeated one.
fn single_or_absent(value: Option<&QueryValue>) -> Option<Option<&str>> {
    match value {
        None => Some(None),
        Some(value) => value.as_single().map(Some),
    }
}

fn clear<S: Storage + ?Sized>(storage: &mut S) {
    storage.remove_item(SIGN_IN_FROM_KEY);
    storage.remove_item(SIGN_IN_STATE_KEY);
}

/// Binds [`capture`] to route changes.
///
/// Each distinct `(readiness, query)` pair is evaluated once; a repeated
/// notification for the same navigation is answered from the last result.
pub struct AuthParamCapture<S> {
    storage: S,
    last: Option<(RouteReadiness, RouteQuery)>,
    params: AuthRedirectParams,
}

impl<S: Storage> AuthParamCapture<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            last: None,
            params: AuthRedirectParams::default(),
        }
    }

    pub fn on_route_change(
        &mut self,
        readiness: RouteReadiness,
        query: &RouteQuery,
    ) -> AuthRedirectParams {
        let unchanged = self
            .last
            .as_ref()
            .is_some_and(|(last_readiness, last_query)| {
                *last_readiness == readiness && last_query == query
            });

        if !unchanged {
            self.params = capture(readiness, query, &mut self.storage);
            self.last = Some((readiness, query.clone()));
        }

        self.params.clone()
    }

    pub fn selection(&self) -> PersistedAuthSelection {
        PersistedAuthSelection::restore(&self.storage)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
