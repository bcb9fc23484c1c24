//! # Error Types
//!
//! Every rejection the engine can produce. The `Display` strings are part of
//! the engine's contract: clients and the deployment tooling match on them
//! exactly, so they must not drift.

use shared_types::{Address, TokenId, Wei};
use thiserror::Error;

// =============================================================================
// MINT ERRORS
// =============================================================================

/// A rejected engine call. Every rejection aborts the call with full state
/// rollback; there is no partial success.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MintError {
    /// Admin-gated operation invoked by a non-admin.
    #[error("Ownable: caller is not the owner")]
    NotOwner,

    /// Lifecycle-gated operation invoked before initialization.
    #[error("Not initialized")]
    NotInitialized,

    /// Second initialization attempt.
    #[error("Initialization can only be done once")]
    AlreadyInitialized,

    /// Voucher missing, malformed, or not from the root signer.
    #[error("Not authorized")]
    NotAuthorized,

    /// Public mint attempted outside a public phase.
    #[error("Not public phase")]
    NotPublicPhase,

    /// Voucher mint attempted in a phase that does not admit it.
    #[error("Not legal phase")]
    NotLegalPhase,

    /// Dev allocation count is not a multiple of the batch size.
    #[error("Can only mint a multiple of the maxBatchSize")]
    NotBatchMultiple,

    /// Per-address, phase-supply, or collection cap exceeded.
    #[error("Over phase limit")]
    OverPhaseLimit,

    /// Dev sub-ledger cap exceeded.
    #[error("Too many already minted before dev mint")]
    DevAllowanceExhausted,

    /// Attached value below the phase price for the requested count.
    #[error("Not enough ether sent")]
    InsufficientPayment,

    /// Zero-count mint request.
    #[error("Mint zero quantity")]
    ZeroQuantity,

    /// Settlement or withdrawal transfer failed.
    #[error("Transfer failed: {0}")]
    Transfer(#[from] TransferError),
}

// =============================================================================
// COLLABORATOR ERRORS
// =============================================================================

/// Failure from the value-transfer collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Source account does not hold `requested` wei.
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Wei, available: Wei },

    /// Destination refused the transfer.
    #[error("destination rejected funds: {0:?}")]
    Rejected(Address),
}

/// Failure from the token-ownership collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OwnershipError {
    /// The token has never been minted.
    #[error("unknown token: {0}")]
    UnknownToken(TokenId),

    /// Transfer initiated by someone other than the current owner.
    #[error("transfer of token {token} not initiated by owner")]
    NotTokenOwner { token: TokenId },
}

// =============================================================================
// TESTS
// =============================================================================
