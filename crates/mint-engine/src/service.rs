//! # Mint Service
//!
//! Wires the pure engine state to its collaborators and exposes the
//! boundary API. One `RwLock` guards the whole mutable state: every
//! mutating operation holds the write guard from first check to final
//! commit, so calls are atomic and totally ordered; read accessors take the
//! read guard and touch nothing.
//!
//! Check ordering per path is externally observable (clients match on
//! reason strings), so each operation spells its sequence out explicitly
//! instead of sharing a generic pipeline.

use parking_lot::RwLock;
use shared_types::{Address, Hash, TokenId, Wei};
use tracing::{debug, info, warn};

use crate::domain::engine::EngineState;
use crate::domain::entities::{
    CollectionConfig, InitializeParams, MintClass, MintReceipt, Phase, PhaseKind, TokenRange,
};
use crate::domain::errors::MintError;
use crate::domain::invariants;
use crate::ports::inbound::MintApi;
use crate::ports::outbound::{OwnershipLedger, SignatureAuthority, ValueGateway};
use mint_signatures::{allowlist_digest, EcdsaSignature};

/// The deployed minting engine for one collection.
pub struct MintService<A, O, V> {
    owner: Address,
    address: Address,
    config: CollectionConfig,
    authority: A,
    ownership: O,
    gateway: V,
    state: RwLock<EngineState>,
}

impl<A, O, V> MintService<A, O, V>
where
    A: SignatureAuthority,
    O: OwnershipLedger,
    V: ValueGateway,
{
    /// Deploys a collection: `owner` is the admin identity, `address` the
    /// engine's own account at the value gateway.
    pub fn new(
        owner: Address,
        address: Address,
        config: CollectionConfig,
        authority: A,
        ownership: O,
        gateway: V,
    ) -> Self {
        info!(name = %config.name, %owner, "collection deployed");
        Self {
            owner,
            address,
            config,
            authority,
            ownership,
            gateway,
            state: RwLock::new(EngineState::new()),
        }
    }

    fn require_owner(&self, caller: Address) -> Result<(), MintError> {
        if caller == self.owner {
            Ok(())
        } else {
            Err(MintError::NotOwner)
        }
    }

    // =========================================================================
    // READ SURFACE
    // =========================================================================

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// The engine's own account at the value gateway.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub fn max_mint_per_tx(&self) -> u64 {
        self.config.max_mint_per_tx
    }

    #[must_use]
    pub fn collection_max_supply(&self) -> u64 {
        self.config.collection_max_supply
    }

    #[must_use]
    pub fn max_supply_for_dev(&self) -> u64 {
        self.config.max_supply_for_dev
    }

    #[must_use]
    pub fn total_supply(&self) -> u64 {
        self.state.read().ledger().total_minted()
    }

    /// Lifetime mints by `identity`; unaffected by transfers.
    #[must_use]
    pub fn number_minted(&self, identity: Address) -> u64 {
        self.state.read().ledger().minted_by(identity)
    }

    #[must_use]
    pub fn base_uri(&self) -> String {
        self.state.read().base_uri().to_owned()
    }

    #[must_use]
    pub fn unrevealed_uri(&self) -> String {
        self.state.read().unrevealed_uri().to_owned()
    }

    #[must_use]
    pub fn current_phase_name(&self) -> String {
        self.state.read().phases().current().name.clone()
    }

    #[must_use]
    pub fn current_phase_price(&self) -> Wei {
        self.state.read().phases().current().unit_price
    }

    #[must_use]
    pub fn current_phase_max_mint_per_address(&self) -> u64 {
        self.state.read().phases().current().max_mint_per_address
    }

    #[must_use]
    pub fn current_phase_max_supply(&self) -> u64 {
        self.state.read().phases().current().max_supply
    }

    /// Wei held by the engine (collected payments plus unsolicited value).
    #[must_use]
    pub fn held_balance(&self) -> Wei {
        self.state.read().held_balance()
    }

    #[must_use]
    pub fn balance_of(&self, holder: Address) -> u64 {
        self.ownership.balance_of(holder)
    }

    #[must_use]
    pub fn owner_of(&self, token: TokenId) -> Option<Address> {
        self.ownership.owner_of(token)
    }

    #[must_use]
    pub fn token_of_owner_by_index(&self, holder: Address, index: u64) -> Option<TokenId> {
        self.ownership.token_of_owner_by_index(holder, index)
    }

    /// The ownership collaborator (the surrounding system transfers through
    /// it directly; the engine only assigns).
    #[must_use]
    pub fn ownership(&self) -> &O {
        &self.ownership
    }

    /// The value-transfer collaborator.
    #[must_use]
    pub fn gateway(&self) -> &V {
        &self.gateway
    }

    // =========================================================================
    // MINT PATHS (internal bodies; logging wrappers live in the trait impl)
    // =========================================================================

    fn dev_mint(&self, recipient: Address, count: u64) -> Result<TokenRange, MintError> {
        let mut state = self.state.write();
        state.authorize_dev(count, &self.config)?;

        let tokens = state.commit_mint(recipient, count, MintClass::Dev);
        self.ownership.assign(recipient, tokens);
        debug_assert!(invariants::check_all(&state, &self.config).is_empty());
        Ok(tokens)
    }

    fn voucher_mint(
        &self,
        caller: Address,
        signature: &EcdsaSignature,
        count: u64,
        value: Wei,
    ) -> Result<MintReceipt, MintError> {
        let mut state = self.state.write();

        let phase_name = state.require_phase(PhaseKind::Allowlisted)?.name.clone();
        let digest = allowlist_digest(&self.config.name, caller, &phase_name);
        if !self
            .authority
            .verify(&digest, signature, state.trusted_signer())
        {
            return Err(MintError::NotAuthorized);
        }
        state.check_address_quota(caller, count)?;
        let debit = state.sale_debit(count, value)?;
        self.settle(&mut state, caller, count, debit)
    }

    fn public_mint(
        &self,
        caller: Address,
        count: u64,
        value: Wei,
    ) -> Result<MintReceipt, MintError> {
        let mut state = self.state.write();

        state.require_phase(PhaseKind::Public)?;
        let debit = state.sale_debit(count, value)?;
        state.check_address_quota(caller, count)?;
        self.settle(&mut state, caller, count, debit)
    }

    /// Shared tail of both paid paths: supply checks, payment collection,
    /// commit, token assignment. Collects exactly the debit; overpayment
    /// never leaves the caller.
    fn settle(
        &self,
        state: &mut EngineState,
        caller: Address,
        count: u64,
        debit: Wei,
    ) -> Result<MintReceipt, MintError> {
        state.check_phase_supply(count)?;
        state
            .ledger()
            .check_capacity(MintClass::Sale, count, &self.config)?;

        // Last fallible step before any mutation
        self.gateway.transfer(caller, self.address, debit)?;

        let tokens = state.commit_mint(caller, count, MintClass::Sale);
        state.credit(debit);
        self.ownership.assign(caller, tokens);
        debug_assert!(invariants::check_all(state, &self.config).is_empty());
        debug_assert!(invariants::check_settlement_consistency(
            state,
            self.gateway.balance_of(self.address),
        ));
        Ok(MintReceipt {
            tokens,
            charged: debit,
        })
    }
}

// =============================================================================
// BOUNDARY API
// =============================================================================

impl<A, O, V> MintApi for MintService<A, O, V>
where
    A: SignatureAuthority,
    O: OwnershipLedger,
    V: ValueGateway,
{
    fn initialize(&self, caller: Address, params: InitializeParams) -> Result<(), MintError> {
        self.require_owner(caller)?;
        let mut state = self.state.write();
        state.initialize(params)?;
        info!(
            signer = %state.trusted_signer(),
            phase = %state.phases().current().name,
            "collection initialized"
        );
        Ok(())
    }

    fn set_phase(&self, caller: Address, phase: Phase) -> Result<(), MintError> {
        self.require_owner(caller)?;
        let mut state = self.state.write();
        state.set_phase(phase);
        info!(
            phase = %state.phases().current().name,
            generation = state.phases().generation(),
            "phase replaced"
        );
        Ok(())
    }

    fn set_root_signer(&self, caller: Address, signer: Address) -> Result<(), MintError> {
        self.require_owner(caller)?;
        self.state.write().set_trusted_signer(signer);
        info!(%signer, "root signer rotated");
        Ok(())
    }

    fn set_base_uri(&self, caller: Address, uri: String) -> Result<(), MintError> {
        self.require_owner(caller)?;
        self.state.write().set_base_uri(uri);
        Ok(())
    }

    fn mint_cards_for_address(
        &self,
        caller: Address,
        recipient: Address,
        count: u64,
    ) -> Result<TokenRange, MintError> {
        self.require_owner(caller)?;
        match self.dev_mint(recipient, count) {
            Ok(tokens) => {
                info!(%recipient, start = tokens.start, end = tokens.end, "dev mint");
                Ok(tokens)
            }
            Err(err) => {
                warn!(%recipient, count, %err, "dev mint rejected");
                Err(err)
            }
        }
    }

    fn mint_cards(
        &self,
        caller: Address,
        signature: &EcdsaSignature,
        count: u64,
        value: Wei,
    ) -> Result<MintReceipt, MintError> {
        match self.voucher_mint(caller, signature, count, value) {
            Ok(receipt) => {
                info!(
                    %caller,
                    start = receipt.tokens.start,
                    end = receipt.tokens.end,
                    charged = %receipt.charged,
                    "voucher mint"
                );
                Ok(receipt)
            }
            Err(err) => {
                warn!(%caller, count, %err, "voucher mint rejected");
                Err(err)
            }
        }
    }

    fn mint_cards_public(
        &self,
        caller: Address,
        count: u64,
        value: Wei,
    ) -> Result<MintReceipt, MintError> {
        match self.public_mint(caller, count, value) {
            Ok(receipt) => {
                info!(
                    %caller,
                    start = receipt.tokens.start,
                    end = receipt.tokens.end,
                    charged = %receipt.charged,
                    "public mint"
                );
                Ok(receipt)
            }
            Err(err) => {
                warn!(%caller, count, %err, "public mint rejected");
                Err(err)
            }
        }
    }

    fn withdraw(&self, caller: Address, destination: Address) -> Result<Wei, MintError> {
        self.require_owner(caller)?;
        let mut state = self.state.write();
        let amount = state.held_balance();
        self.gateway.transfer(self.address, destination, amount)?;
        state.drain_balance();
        info!(%destination, %amount, "withdrawal");
        Ok(amount)
    }

    fn receive_value(&self, from: Address, amount: Wei) -> Result<(), MintError> {
        let mut state = self.state.write();
        self.gateway.transfer(from, self.address, amount)?;
        state.credit(amount);
        debug!(%from, %amount, "unsolicited value received");
        Ok(())
    }

    fn is_valid_signature(&self, digest: &Hash, signature: &EcdsaSignature) -> bool {
        let signer = self.state.read().trusted_signer();
        self.authority.verify(digest, signature, signer)
    }
}

// =============================================================================
// TESTS
// =============================================================================
