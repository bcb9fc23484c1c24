//! # Mint Engine
//!
//! A phased, signature-gated, supply-bounded minting engine for an on-chain
//! collectible set.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): pure minting logic (lifecycle, phase
//!   slot, supply ledger, authorization checks). No I/O.
//! - **Ports Layer** (`ports/`): the inbound [`MintApi`] surface and the
//!   outbound collaborator capabilities (signature authority, token
//!   ownership, value transfer).
//! - **Adapters Layer** (`adapters/`): the secp256k1 recovery authority and
//!   in-memory collaborator implementations.
//! - **Service Layer** (`service.rs`): wires domain to ports under one
//!   exclusive section per operation.
//!
//! ## Guarantees
//!
//! - The lifetime total never exceeds the collection cap, for any sequence
//!   of calls.
//! - Every rejection carries a fixed reason string and rolls the call back
//!   completely; counters, token assignments, and balances move together or
//!   not at all.
//! - Mint quota is consumption-based: transferring tokens away never frees
//!   it.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::entities::{
    CollectionConfig, InitializeParams, LifecycleState, MintClass, MintReceipt, Phase, PhaseKind,
    TokenRange,
};
pub use domain::errors::{MintError, OwnershipError, TransferError};
pub use ports::inbound::MintApi;
pub use ports::outbound::{OwnershipLedger, SignatureAuthority, ValueGateway};
pub use service::MintService;
