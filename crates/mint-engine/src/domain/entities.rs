//! # Core Domain Entities
//!
//! The value types the minting engine is built from: the immutable
//! collection configuration, the lifecycle flag, phases, and mint results.

use serde::{Deserialize, Serialize};
use shared_types::{Address, TokenId, Wei};

// =============================================================================
// COLLECTION CONFIG
// =============================================================================

/// Immutable collection parameters, fixed at construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Collection name; also the first field of every allowlist voucher.
    pub name: String,
    /// Collection symbol.
    pub symbol: String,
    /// Dev allocations must be minted in multiples of this batch size.
    pub max_mint_per_tx: u64,
    /// Hard cap on tokens ever minted.
    pub collection_max_supply: u64,
    /// Cap on the dev/airdrop sub-ledger.
    pub max_supply_for_dev: u64,
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// One-way lifecycle flag. Flips to `Initialized` exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    Uninitialized,
    Initialized,
}

impl LifecycleState {
    #[must_use]
    pub fn is_initialized(self) -> bool {
        matches!(self, Self::Initialized)
    }
}

// =============================================================================
// PHASE
// =============================================================================

/// Which mint path a phase admits. Phases are strictly partitioned: a
/// voucher-gated phase is never publicly mintable and vice versa, and the
/// bootstrap sentinel admits neither path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseKind {
    /// Pre-initialization sentinel; no sale path is open.
    Bootstrap,
    /// Mints require a backend-signed voucher.
    Allowlisted,
    /// Open to any caller, payment only.
    Public,
}

/// The active minting rule set. Exactly one phase is current at any time;
/// replacing it resets every phase-scoped counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub kind: PhaseKind,
    /// Price per unit in wei.
    pub unit_price: Wei,
    /// Per-address mint cap within this phase.
    pub max_mint_per_address: u64,
    /// Total supply cap within this phase.
    pub max_supply: u64,
}

impl Phase {
    /// The sentinel phase observable before initialization.
    #[must_use]
    pub fn preparing() -> Self {
        Self {
            name: "Preparing".to_owned(),
            kind: PhaseKind::Bootstrap,
            unit_price: Wei::zero(),
            max_mint_per_address: 0,
            max_supply: 0,
        }
    }

    /// Price of `count` units. Saturates at `Wei::MAX`, which no payment
    /// can cover.
    #[must_use]
    pub fn total_price(&self, count: u64) -> Wei {
        self.unit_price.saturating_mul(Wei::from(count))
    }
}

// =============================================================================
// MINT RESULTS
// =============================================================================

/// Which authorization path a reservation came through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MintClass {
    /// Admin airdrop; unpaid, bounded by the dev sub-ledger.
    Dev,
    /// Paid mint (allowlisted or public).
    Sale,
}

/// An inclusive range of freshly assigned token identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRange {
    pub start: TokenId,
    pub end: TokenId,
}

impl TokenRange {
    #[must_use]
    pub fn count(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Iterates the assigned identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = TokenId> {
        self.start..=self.end
    }
}

/// Outcome of a successful paid mint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintReceipt {
    /// Token identifiers assigned to the caller.
    pub tokens: TokenRange,
    /// Wei actually collected; any attached value beyond this stays with
    /// the caller.
    pub charged: Wei,
}

/// Parameters of the one-time initialization call.
#[derive(Clone, Debug)]
pub struct InitializeParams {
    pub root_signer: Address,
    pub base_uri: String,
    pub unrevealed_uri: String,
    pub initial_phase: Phase,
}
