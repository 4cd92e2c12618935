use std::env::var;

/// The only raw value that turns maintenance on.
pub const ENABLED_SENTINEL: &str = "true";

/// Default environment variable holding the raw maintenance flag.
pub const DEFAULT_MAINTENANCE_VAR: &str = "MAINTENANCE_MODE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceFlag {
    Enabled,
    Disabled,
}

impl MaintenanceFlag {
    /// Interpret a raw flag value. Anything other than the exact sentinel,
    /// including an absent value, is `Disabled`.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(ENABLED_SENTINEL) => Self::Enabled,
            _ => Self::Disabled,
        }
    }

    #[must_use]
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

/// Accessor for the raw maintenance flag, consulted once per request.
pub trait FlagSource: Send + Sync {
    fn read(&self) -> Option<String>;

    fn flag(&self) -> MaintenanceFlag {
        MaintenanceFlag::parse(self.read().as_deref())
    }
}

/// Reads the flag from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvFlag {
    var: String,
}

impl EnvFlag {
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    #[must_use]
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvFlag {
    fn default() -> Self {
        Self::new(DEFAULT_MAINTENANCE_VAR)
    }
}

impl FlagSource for EnvFlag {
    fn read(&self) -> Option<String> {
        // non-unicode values are treated like an unset variable
        var(&self.var).ok()
    }
}

/// A constant flag value.
#[derive(Debug, Clone, Default)]
pub struct FixedFlag(pub Option<String>);

impl FixedFlag {
    #[must_use]
    pub fn enabled() -> Self {
        Self(Some(ENABLED_SENTINEL.to_string()))
    }

    #[must_use]
    pub fn raw(value: &str) -> Self {
        Self(Some(value.to_string()))
    }
}

impl FlagSource for FixedFlag {
    fn read(&self) -> Option<String> {
        self.0.clone()
    }
}
