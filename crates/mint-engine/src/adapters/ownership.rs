//! # In-Memory Ownership Ledger
//!
//! Owner-indexed, enumerable token ledger standing in for the external
//! ERC-721-equivalent collaborator. Interior mutability lets the service
//! call it while holding its own state lock.

use std::collections::HashMap;

use parking_lot::RwLock;
use shared_types::{Address, TokenId};

use crate::domain::entities::TokenRange;
use crate::domain::errors::OwnershipError;
use crate::ports::outbound::OwnershipLedger;

#[derive(Debug, Default)]
struct Book {
    owners: HashMap<TokenId, Address>,
    holdings: HashMap<Address, Vec<TokenId>>,
}

/// In-memory [`OwnershipLedger`] adapter.
#[derive(Debug, Default)]
pub struct InMemoryOwnership {
    book: RwLock<Book>,
}

impl InMemoryOwnership {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl OwnershipLedger for InMemoryOwnership {
    fn assign(&self, to: Address, tokens: TokenRange) {
        let mut book = self.book.write();
        book.holdings.entry(to).or_default().extend(tokens.ids());
        for id in tokens.ids() {
            book.owners.insert(id, to);
        }
    }

    fn owner_of(&self, token: TokenId) -> Option<Address> {
        self.book.read().owners.get(&token).copied()
    }

    fn balance_of(&self, owner: Address) -> u64 {
        self.book
            .read()
            .holdings
            .get(&owner)
            .map_or(0, |held| held.len() as u64)
    }

    fn total_supply(&self) -> u64 {
        self.book.read().owners.len() as u64
    }

    fn token_of_owner_by_index(&self, owner: Address, index: u64) -> Option<TokenId> {
        self.book
            .read()
            .holdings
            .get(&owner)
            .and_then(|held| held.get(index as usize).copied())
    }

    fn transfer(&self, from: Address, to: Address, token: TokenId) -> Result<(), OwnershipError> {
        let mut book = self.book.write();
        match book.owners.get(&token) {
            None => return Err(OwnershipError::UnknownToken(token)),
            Some(&owner) if owner != from => {
                return Err(OwnershipError::NotTokenOwner { token })
            }
            Some(_) => {}
        }
        book.owners.insert(token, to);
        if let Some(held) = book.holdings.get_mut(&from) {
            held.retain(|&id| id != token);
        }
        book.holdings.entry(to).or_default().push(token);
        Ok(())
    }
}
