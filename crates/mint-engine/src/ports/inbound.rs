//! # Inbound Port (API)
//!
//! The callable surface of the minting engine. Wallets, deployment tooling,
//! and tests drive the engine exclusively through this trait; every call is
//! atomic and totally ordered with respect to all others.

use shared_types::{Address, Hash, Wei};

use crate::domain::entities::{InitializeParams, MintReceipt, Phase, TokenRange};
use crate::domain::errors::MintError;
use mint_signatures::EcdsaSignature;

/// Boundary operations of the minting engine.
///
/// `caller` is the authenticated identity of the transaction sender; `value`
/// on payable operations is the wei attached to the call. Rejections carry
/// fixed reason strings (see [`MintError`]) and leave no trace in state.
pub trait MintApi {
    /// One-time setup: root signer, URIs, and the first phase.
    ///
    /// # Errors
    ///
    /// `NotOwner`; `AlreadyInitialized` on any call after the first.
    fn initialize(&self, caller: Address, params: InitializeParams) -> Result<(), MintError>;

    /// Replaces the current phase wholesale, resetting phase-scoped
    /// counters.
    ///
    /// # Errors
    ///
    /// `NotOwner`.
    fn set_phase(&self, caller: Address, phase: Phase) -> Result<(), MintError>;

    /// Rotates the trusted allowlist signer.
    ///
    /// # Errors
    ///
    /// `NotOwner`.
    fn set_root_signer(&self, caller: Address, signer: Address) -> Result<(), MintError>;

    /// Updates the metadata base path.
    ///
    /// # Errors
    ///
    /// `NotOwner`.
    fn set_base_uri(&self, caller: Address, uri: String) -> Result<(), MintError>;

    /// Admin airdrop of `count` tokens to `recipient`; unpaid, bounded by
    /// the dev sub-ledger.
    ///
    /// # Errors
    ///
    /// `NotOwner`, `NotInitialized`, `NotBatchMultiple`,
    /// `DevAllowanceExhausted`, `ZeroQuantity`.
    fn mint_cards_for_address(
        &self,
        caller: Address,
        recipient: Address,
        count: u64,
    ) -> Result<TokenRange, MintError>;

    /// Voucher-gated mint of `count` tokens to the caller.
    ///
    /// # Errors
    ///
    /// `NotLegalPhase`, `NotAuthorized`, `OverPhaseLimit`,
    /// `InsufficientPayment`, `ZeroQuantity`, `Transfer`.
    fn mint_cards(
        &self,
        caller: Address,
        signature: &EcdsaSignature,
        count: u64,
        value: Wei,
    ) -> Result<MintReceipt, MintError>;

    /// Open mint of `count` tokens to the caller during a public phase.
    ///
    /// # Errors
    ///
    /// `NotPublicPhase`, `InsufficientPayment`, `OverPhaseLimit`,
    /// `ZeroQuantity`, `Transfer`.
    fn mint_cards_public(
        &self,
        caller: Address,
        count: u64,
        value: Wei,
    ) -> Result<MintReceipt, MintError>;

    /// Pays the entire held balance out to `destination`.
    ///
    /// # Errors
    ///
    /// `NotOwner`; `Transfer` if the destination rejects the funds, in which
    /// case the balance is kept intact.
    fn withdraw(&self, caller: Address, destination: Address) -> Result<Wei, MintError>;

    /// Accepts unsolicited value. Never rejected; no counters move.
    ///
    /// # Errors
    ///
    /// `Transfer` if `from` cannot cover `amount`.
    fn receive_value(&self, from: Address, amount: Wei) -> Result<(), MintError>;

    /// True iff `signature` over `digest` recovers the current trusted
    /// signer. Read-only; used by backends to validate rotation.
    fn is_valid_signature(&self, digest: &Hash, signature: &EcdsaSignature) -> bool;
}
