/// Shared types for the token-launch trading core
///
/// This crate provides the common value types, constants, and error
/// definitions used across the math and SDK crates: amounts in attos,
/// chain account identities, signable request payloads, and market state.

pub mod account;
pub mod amount;
pub mod constants;
pub mod errors;
pub mod market;
pub mod request;

// Re-export all public types
pub use account::*;
pub use amount::*;
pub use constants::*;
pub use errors::*;
pub use market::*;
pub use request::*;

/// Result type alias using the shared error type
pub type LaunchResult<T> = std::result::Result<T, LaunchError>;
