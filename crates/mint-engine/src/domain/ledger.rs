//! # Supply Ledger
//!
//! Lifetime and phase-scoped mint accounting. The ledger owns three kinds of
//! counters:
//!
//! - `total_minted`: monotonic, bounded by the collection cap;
//! - `dev_minted`: a dedicated sub-ledger for admin airdrops, bounded by its
//!   own cap independently of how much of the collection remains;
//! - phase-scoped counts, keyed by phase [`Generation`] so a phase change
//!   resets them without touching per-address storage.
//!
//! Token identifiers are consecutive and one-based: a reservation of `n`
//! units yields `total_minted_before + 1 ..= total_minted_before + n`.
//!
//! Capacity checks and recording are split so the caller can order its own
//! checks (signature, quota, payment) in between; both halves run under the
//! engine's exclusive section, so a passed check cannot go stale before the
//! matching `record`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared_types::Address;

use crate::domain::entities::{CollectionConfig, MintClass, TokenRange};
use crate::domain::errors::MintError;
use crate::domain::phase::Generation;

/// Mint accounting for the whole collection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SupplyLedger {
    total_minted: u64,
    dev_minted: u64,
    minted_by_address: HashMap<Address, u64>,
    phase_minted_by_address: HashMap<Address, (Generation, u64)>,
    phase_minted_total: (Generation, u64),
}

impl SupplyLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens minted over the collection's lifetime.
    #[must_use]
    pub fn total_minted(&self) -> u64 {
        self.total_minted
    }

    /// Tokens minted through the dev/airdrop path.
    #[must_use]
    pub fn dev_minted(&self) -> u64 {
        self.dev_minted
    }

    /// Lifetime mints by `identity`. Never decreases; transfers do not
    /// return quota.
    #[must_use]
    pub fn minted_by(&self, identity: Address) -> u64 {
        self.minted_by_address.get(&identity).copied().unwrap_or(0)
    }

    /// Mints by `identity` within the phase generation `generation`.
    /// A stale generation reads as zero.
    #[must_use]
    pub fn phase_minted_by(&self, identity: Address, generation: Generation) -> u64 {
        match self.phase_minted_by_address.get(&identity) {
            Some(&(gen, count)) if gen == generation => count,
            _ => 0,
        }
    }

    /// Total mints within the phase generation `generation`.
    #[must_use]
    pub fn phase_minted_total(&self, generation: Generation) -> u64 {
        match self.phase_minted_total {
            (gen, count) if gen == generation => count,
            _ => 0,
        }
    }

    /// Checks global capacity for a prospective mint of `count` units.
    ///
    /// # Errors
    ///
    /// - [`MintError::ZeroQuantity`] for `count == 0`
    /// - [`MintError::DevAllowanceExhausted`] when a dev mint would exceed
    ///   the dev sub-ledger cap or the collection cap
    /// - [`MintError::OverPhaseLimit`] when a sale mint would exceed the
    ///   collection cap
    pub fn check_capacity(
        &self,
        class: MintClass,
        count: u64,
        config: &CollectionConfig,
    ) -> Result<(), MintError> {
        if count == 0 {
            return Err(MintError::ZeroQuantity);
        }
        match class {
            MintClass::Dev => {
                if !fits(self.dev_minted, count, config.max_supply_for_dev)
                    || !fits(self.total_minted, count, config.collection_max_supply)
                {
                    return Err(MintError::DevAllowanceExhausted);
                }
            }
            MintClass::Sale => {
                if !fits(self.total_minted, count, config.collection_max_supply) {
                    return Err(MintError::OverPhaseLimit);
                }
            }
        }
        Ok(())
    }

    /// Commits a reservation of `count` units for `identity` and returns the
    /// assigned identifier range.
    ///
    /// Callers must have passed [`Self::check_capacity`] within the same
    /// exclusive section; counters saturate rather than wrap if that
    /// contract is violated.
    pub fn record(
        &mut self,
        identity: Address,
        count: u64,
        class: MintClass,
        generation: Generation,
    ) -> TokenRange {
        let start = self.total_minted + 1;
        let end = self.total_minted.saturating_add(count);
        self.total_minted = end;
        if class == MintClass::Dev {
            self.dev_minted = self.dev_minted.saturating_add(count);
        }

        let lifetime = self.minted_by_address.entry(identity).or_insert(0);
        *lifetime = lifetime.saturating_add(count);

        let scoped = self
            .phase_minted_by_address
            .entry(identity)
            .or_insert((generation, 0));
        if scoped.0 != generation {
            *scoped = (generation, 0);
        }
        scoped.1 = scoped.1.saturating_add(count);

        if self.phase_minted_total.0 != generation {
            self.phase_minted_total = (generation, 0);
        }
        self.phase_minted_total.1 = self.phase_minted_total.1.saturating_add(count);

        TokenRange { start, end }
    }
}

/// `used + count <= cap`, overflow-safe.
fn fits(used: u64, count: u64, cap: u64) -> bool {
    used.checked_add(count).is_some_and(|total| total <= cap)
}

// =============================================================================
// TESTS
// =============================================================================
