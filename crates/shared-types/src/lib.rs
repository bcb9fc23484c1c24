//! # Shared Types Crate
//!
//! Cross-crate primitives for the CardMint workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every value type that crosses a crate
//!   boundary (addresses, hashes, wei amounts, token identifiers) is defined
//!   here.
//! - **Value semantics**: all types are cheap to copy or clone and carry no
//!   behavior beyond construction, formatting, and inspection.

pub mod primitives;

pub use primitives::{Address, Hash, TokenId, Wei, U256};
