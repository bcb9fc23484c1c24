//! # Domain Invariants
//!
//! Properties that must hold after every engine operation, checked in debug
//! builds after each commit and directly by tests.

use shared_types::Wei;

use crate::domain::engine::EngineState;
use crate::domain::entities::CollectionConfig;

/// The lifetime total never exceeds the collection cap.
#[must_use]
pub fn check_collection_cap(state: &EngineState, config: &CollectionConfig) -> bool {
    state.ledger().total_minted() <= config.collection_max_supply
}

/// The dev sub-ledger never exceeds its own cap.
#[must_use]
pub fn check_dev_allowance(state: &EngineState, config: &CollectionConfig) -> bool {
    state.ledger().dev_minted() <= config.max_supply_for_dev
}

/// Dev mints are a subset of all mints.
#[must_use]
pub fn check_dev_subset(state: &EngineState) -> bool {
    state.ledger().dev_minted() <= state.ledger().total_minted()
}

/// The engine's held balance matches the value-transfer collaborator's view
/// of its account. Holds as long as all value enters and leaves through
/// engine operations.
#[must_use]
pub fn check_settlement_consistency(state: &EngineState, gateway_balance: Wei) -> bool {
    state.held_balance() == gateway_balance
}

/// A violated invariant, for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    CollectionCapExceeded { minted: u64, cap: u64 },
    DevAllowanceExceeded { dev_minted: u64, cap: u64 },
    DevExceedsTotal { dev_minted: u64, total: u64 },
}

/// Runs every state-local invariant and collects the violations.
#[must_use]
pub fn check_all(state: &EngineState, config: &CollectionConfig) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    if !check_collection_cap(state, config) {
        violations.push(InvariantViolation::CollectionCapExceeded {
            minted: state.ledger().total_minted(),
            cap: config.collection_max_supply,
        });
    }
    if !check_dev_allowance(state, config) {
        violations.push(InvariantViolation::DevAllowanceExceeded {
            dev_minted: state.ledger().dev_minted(),
            cap: config.max_supply_for_dev,
        });
    }
    if !check_dev_subset(state) {
        violations.push(InvariantViolation::DevExceedsTotal {
            dev_minted: state.ledger().dev_minted(),
            total: state.ledger().total_minted(),
        });
    }
    violations
}
