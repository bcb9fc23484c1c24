//! # Adapters
//!
//! Concrete implementations of the outbound ports: the production signature
//! authority and in-memory stand-ins for the ownership and value
//! collaborators.

pub mod authority;
pub mod bank;
pub mod ownership;

pub use authority::RecoveryAuthority;
pub use bank::InMemoryBank;
pub use ownership::InMemoryOwnership;
