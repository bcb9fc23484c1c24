//! # In-Memory Value Gateway
//!
//! Account-balance ledger standing in for the external value-transfer
//! mechanism. Accounts can be marked as refusing incoming funds to exercise
//! the withdrawal failure path.

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;
use shared_types::{Address, Wei};

use crate::domain::errors::TransferError;
use crate::ports::outbound::ValueGateway;

/// In-memory [`ValueGateway`] adapter.
#[derive(Debug, Default)]
pub struct InMemoryBank {
    accounts: RwLock<HashMap<Address, Wei>>,
    refusing: RwLock<HashSet<Address>>,
}

impl InMemoryBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `account` with `amount` out of thin air (test setup).
    pub fn fund(&self, account: Address, amount: Wei) {
        let mut accounts = self.accounts.write();
        let balance = accounts.entry(account).or_insert_with(Wei::zero);
        *balance = balance.saturating_add(amount);
    }

    /// Marks `account` as refusing all incoming transfers.
    pub fn refuse(&self, account: Address) {
        self.refusing.write().insert(account);
    }
}

impl ValueGateway for InMemoryBank {
    fn transfer(&self, from: Address, to: Address, amount: Wei) -> Result<(), TransferError> {
        if self.refusing.read().contains(&to) {
            return Err(TransferError::Rejected(to));
        }

        let mut accounts = self.accounts.write();
        let available = accounts.get(&from).copied().unwrap_or_else(Wei::zero);
        if available < amount {
            return Err(TransferError::InsufficientFunds {
                requested: amount,
                available,
            });
        }
        accounts.insert(from, available - amount);
        let credited = accounts.entry(to).or_insert_with(Wei::zero);
        *credited = credited.saturating_add(amount);
        Ok(())
    }

    fn balance_of(&self, account: Address) -> Wei {
        self.accounts
            .read()
            .get(&account)
            .copied()
            .unwrap_or_else(Wei::zero)
    }
}
