pub mod health;
pub use self::health::health;

pub mod pages;

pub mod providers;
pub use self::providers::{providers, AuthProviders};
