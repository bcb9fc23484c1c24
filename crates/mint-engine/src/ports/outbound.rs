//! # Outbound Ports (Driven Ports / SPI)
//!
//! Traits for the collaborators the engine depends on. Each has an in-memory
//! adapter in `adapters/`; the signature authority additionally admits test
//! doubles so authorization logic can be exercised without real key
//! material.

use shared_types::{Address, Hash, TokenId, Wei};

use crate::domain::entities::TokenRange;
use crate::domain::errors::{OwnershipError, TransferError};
use mint_signatures::EcdsaSignature;

// =============================================================================
// SIGNATURE AUTHORITY
// =============================================================================

/// Capability to check that a signature over a digest was produced by an
/// expected identity.
pub trait SignatureAuthority: Send + Sync {
    /// True iff `signature` over `digest` recovers exactly `expected`.
    /// Malformed signatures yield false, never an error.
    fn verify(&self, digest: &Hash, signature: &EcdsaSignature, expected: Address) -> bool;
}

// =============================================================================
// TOKEN OWNERSHIP
// =============================================================================

/// The external ERC-721-equivalent ownership ledger. The engine only ever
/// assigns freshly reserved identifier ranges; transfer exists for the
/// surrounding system (and tests) and never returns mint quota.
pub trait OwnershipLedger: Send + Sync {
    /// Records `to` as owner of every token in `tokens`. The ids are fresh
    /// by construction (the supply ledger never hands one out twice).
    fn assign(&self, to: Address, tokens: TokenRange);

    /// Current owner of `token`, if it was ever minted.
    fn owner_of(&self, token: TokenId) -> Option<Address>;

    /// Number of tokens currently held by `owner`.
    fn balance_of(&self, owner: Address) -> u64;

    /// Total tokens ever assigned.
    fn total_supply(&self) -> u64;

    /// Enumerates `owner`'s holdings: the token at position `index`.
    fn token_of_owner_by_index(&self, owner: Address, index: u64) -> Option<TokenId>;

    /// Moves `token` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`OwnershipError::UnknownToken`] or [`OwnershipError::NotTokenOwner`].
    fn transfer(&self, from: Address, to: Address, token: TokenId) -> Result<(), OwnershipError>;
}

// =============================================================================
// VALUE GATEWAY
// =============================================================================

/// The external value-transfer mechanism. Settlement, refund-by-omission,
/// unsolicited receives, and withdrawal all move wei through this port.
pub trait ValueGateway: Send + Sync {
    /// Moves `amount` wei from `from` to `to`. A zero amount succeeds
    /// without effect.
    ///
    /// # Errors
    ///
    /// [`TransferError::InsufficientFunds`] or [`TransferError::Rejected`].
    fn transfer(&self, from: Address, to: Address, amount: Wei) -> Result<(), TransferError>;

    /// Current balance of `account`.
    fn balance_of(&self, account: Address) -> Wei;
}
