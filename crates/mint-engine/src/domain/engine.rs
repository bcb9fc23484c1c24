//! # Engine State
//!
//! The single mutable-state object behind every engine operation: lifecycle
//! flag, phase slot, supply ledger, trusted signer, URIs, and held balance.
//! All methods are pure state-machine logic; collaborator calls (signature
//! recovery, token assignment, value transfer) happen in the service layer,
//! which holds the exclusive section around the whole operation.
//!
//! Checks and commits are separate methods so the service can interleave
//! collaborator calls in the externally observable rejection order.

use shared_types::{Address, Wei};

use crate::domain::entities::{
    CollectionConfig, InitializeParams, LifecycleState, MintClass, Phase, PhaseKind, TokenRange,
};
use crate::domain::errors::MintError;
use crate::domain::ledger::SupplyLedger;
use crate::domain::phase::PhaseSlot;

/// Everything mutable about a deployed collection.
#[derive(Clone, Debug)]
pub struct EngineState {
    lifecycle: LifecycleState,
    phases: PhaseSlot,
    ledger: SupplyLedger,
    trusted_signer: Address,
    base_uri: String,
    unrevealed_uri: String,
    held_balance: Wei,
}

impl EngineState {
    /// Fresh pre-initialization state: sentinel phase, zero signer, empty
    /// URIs, empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lifecycle: LifecycleState::Uninitialized,
            phases: PhaseSlot::new(),
            ledger: SupplyLedger::new(),
            trusted_signer: Address::ZERO,
            base_uri: String::new(),
            unrevealed_uri: String::new(),
            held_balance: Wei::zero(),
        }
    }

    // =========================================================================
    // LIFECYCLE & ADMIN
    // =========================================================================

    /// One-time initialization.
    ///
    /// # Errors
    ///
    /// [`MintError::AlreadyInitialized`] on any call after the first.
    pub fn initialize(&mut self, params: InitializeParams) -> Result<(), MintError> {
        if self.lifecycle.is_initialized() {
            return Err(MintError::AlreadyInitialized);
        }
        self.trusted_signer = params.root_signer;
        self.base_uri = params.base_uri;
        self.unrevealed_uri = params.unrevealed_uri;
        self.phases.replace(params.initial_phase);
        self.lifecycle = LifecycleState::Initialized;
        Ok(())
    }

    pub fn require_initialized(&self) -> Result<(), MintError> {
        if self.lifecycle.is_initialized() {
            Ok(())
        } else {
            Err(MintError::NotInitialized)
        }
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phases.replace(phase);
    }

    pub fn set_trusted_signer(&mut self, signer: Address) {
        self.trusted_signer = signer;
    }

    pub fn set_base_uri(&mut self, uri: String) {
        self.base_uri = uri;
    }

    // =========================================================================
    // AUTHORIZATION CHECKS
    // =========================================================================

    /// Requires the current phase to admit the given mint path.
    ///
    /// # Errors
    ///
    /// [`MintError::NotPublicPhase`] when a public mint hits a non-public
    /// phase; [`MintError::NotLegalPhase`] when a voucher mint hits a phase
    /// that is public or still the bootstrap sentinel.
    pub fn require_phase(&self, wanted: PhaseKind) -> Result<&Phase, MintError> {
        if self.phases.kind() == wanted {
            return Ok(self.phases.current());
        }
        match wanted {
            PhaseKind::Public => Err(MintError::NotPublicPhase),
            _ => Err(MintError::NotLegalPhase),
        }
    }

    /// Per-address cap within the current phase. Quota is consumption-based:
    /// transferring tokens away never returns it.
    pub fn check_address_quota(&self, caller: Address, count: u64) -> Result<(), MintError> {
        let used = self
            .ledger
            .phase_minted_by(caller, self.phases.generation());
        let cap = self.phases.current().max_mint_per_address;
        if within(used, count, cap) {
            Ok(())
        } else {
            Err(MintError::OverPhaseLimit)
        }
    }

    /// Supply cap of the current phase.
    pub fn check_phase_supply(&self, count: u64) -> Result<(), MintError> {
        let used = self.ledger.phase_minted_total(self.phases.generation());
        if within(used, count, self.phases.current().max_supply) {
            Ok(())
        } else {
            Err(MintError::OverPhaseLimit)
        }
    }

    /// Price of `count` units in the current phase, validated against the
    /// attached value.
    ///
    /// # Errors
    ///
    /// [`MintError::InsufficientPayment`] when `value` does not cover it.
    pub fn sale_debit(&self, count: u64, value: Wei) -> Result<Wei, MintError> {
        let debit = self.phases.current().total_price(count);
        if value < debit {
            return Err(MintError::InsufficientPayment);
        }
        Ok(debit)
    }

    /// Full precondition set for a dev/airdrop mint. The allowance check
    /// runs before the batch-size check: once the dev sub-ledger is spent,
    /// every further airdrop reports exhaustion regardless of its shape.
    pub fn authorize_dev(&self, count: u64, config: &CollectionConfig) -> Result<(), MintError> {
        self.require_initialized()?;
        self.ledger.check_capacity(MintClass::Dev, count, config)?;
        if config.max_mint_per_tx == 0 || count % config.max_mint_per_tx != 0 {
            return Err(MintError::NotBatchMultiple);
        }
        Ok(())
    }

    // =========================================================================
    // COMMIT & SETTLEMENT
    // =========================================================================

    /// Commits a fully authorized reservation; returns the assigned ids.
    pub fn commit_mint(&mut self, recipient: Address, count: u64, class: MintClass) -> TokenRange {
        self.ledger
            .record(recipient, count, class, self.phases.generation())
    }

    /// Adds collected payment or unsolicited value to the held balance.
    pub fn credit(&mut self, amount: Wei) {
        self.held_balance = self.held_balance.saturating_add(amount);
    }

    /// Empties the held balance, returning what was held. Callers invoke
    /// this only after the outbound payment has succeeded.
    pub fn drain_balance(&mut self) -> Wei {
        std::mem::take(&mut self.held_balance)
    }

    // =========================================================================
    // READS
    // =========================================================================

    #[must_use]
    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    #[must_use]
    pub fn phases(&self) -> &PhaseSlot {
        &self.phases
    }

    #[must_use]
    pub fn ledger(&self) -> &SupplyLedger {
        &self.ledger
    }

    #[must_use]
    pub fn trusted_signer(&self) -> Address {
        self.trusted_signer
    }

    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    #[must_use]
    pub fn unrevealed_uri(&self) -> &str {
        &self.unrevealed_uri
    }

    #[must_use]
    pub fn held_balance(&self) -> Wei {
        self.held_balance
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}

/// `used + count <= cap`, overflow-safe.
fn within(used: u64, count: u64, cap: u64) -> bool {
    used.checked_add(count).is_some_and(|total| total <= cap)
}

// =============================================================================
// TESTS
// =============================================================================
