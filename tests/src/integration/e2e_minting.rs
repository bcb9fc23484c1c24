//! # End-to-End Minting Flows
//!
//! Drives a collection through its whole life: deployment reads, one-time
//! initialization, the dev airdrop, the free allowlisted phase, and the
//! public sale, checking every rejection reason and counter along the way.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use mint_engine::{MintApi, MintError, OwnershipLedger, Phase, PhaseKind, TokenRange};
    use shared_types::Wei;

    // =========================================================================
    // DEPLOYMENT
    // =========================================================================

    #[test]
    fn test_deployment_reads() {
        let bench = TestBench::deploy();
        let s = &bench.service;

        assert_eq!(s.name(), "NFT");
        assert_eq!(s.symbol(), "NFT");
        assert_eq!(s.owner(), bench.owner);
        assert_eq!(s.max_mint_per_tx(), 5);
        assert_eq!(s.collection_max_supply(), 40);
        assert_eq!(s.max_supply_for_dev(), 15);

        // Nothing minted: total supply equals the deployer's balance (zero)
        assert_eq!(s.total_supply(), 0);
        assert_eq!(s.balance_of(bench.owner), 0);
    }

    #[test]
    fn test_phase_is_sentinel_before_initialization() {
        let bench = TestBench::deploy();
        assert_eq!(bench.service.current_phase_name(), "Preparing");
        assert_eq!(bench.service.current_phase_price(), Wei::zero());
    }

    #[test]
    fn test_airdrop_rejected_before_initialization() {
        let bench = TestBench::deploy();
        assert_eq!(
            bench
                .service
                .mint_cards_for_address(bench.owner, bench.beneficiary, 15),
            Err(MintError::NotInitialized)
        );
    }

    #[test]
    fn test_initialize_sets_parameters() {
        let bench = TestBench::deploy_initialized();
        let s = &bench.service;

        assert_eq!(s.base_uri(), BASE_URI);
        assert_eq!(s.unrevealed_uri(), UNREVEALED_URI);
        assert_eq!(s.current_phase_name(), "Initialize");
        assert_eq!(s.current_phase_price(), milli_ether(50));
        assert_eq!(s.current_phase_max_mint_per_address(), 0);
        assert_eq!(s.current_phase_max_supply(), 0);
    }

    #[test]
    fn test_initialize_only_once() {
        let bench = TestBench::deploy_initialized();

        let mut replay = bench.init_params();
        replay.base_uri = "ipfs://replayed/".to_owned();
        let err = bench
            .service
            .initialize(bench.owner, replay)
            .unwrap_err();
        assert_eq!(err.to_string(), "Initialization can only be done once");

        // The replay altered nothing
        assert_eq!(bench.service.base_uri(), BASE_URI);
        assert_eq!(bench.service.current_phase_name(), "Initialize");
    }

    // =========================================================================
    // DEV AIRDROP
    // =========================================================================

    #[test]
    fn test_airdrop_quantity_rules() {
        let bench = TestBench::deploy_initialized();
        let s = &bench.service;

        // Above the dev allowance, even in one batch-aligned call
        assert_eq!(
            s.mint_cards_for_address(bench.owner, bench.team01, 20),
            Err(MintError::DevAllowanceExhausted)
        );
        // Not a multiple of the batch size
        assert_eq!(
            s.mint_cards_for_address(bench.owner, bench.team01, 14),
            Err(MintError::NotBatchMultiple)
        );

        let tokens = s
            .mint_cards_for_address(bench.owner, bench.team01, 15)
            .unwrap();
        assert_eq!(tokens, TokenRange { start: 1, end: 15 });
        assert_eq!(s.owner_of(1), Some(bench.team01));
        assert_eq!(s.owner_of(15), Some(bench.team01));
        assert_eq!(s.number_minted(bench.team01), 15);
        assert_eq!(s.total_supply(), 15);

        // The allowance is spent; exhaustion wins over the batch-size rule
        assert_eq!(
            s.mint_cards_for_address(bench.owner, bench.team01, 1),
            Err(MintError::DevAllowanceExhausted)
        );
        assert_eq!(s.total_supply(), 15);
    }

    #[test]
    fn test_airdrop_is_unpaid() {
        let bench = TestBench::deploy_initialized();
        let before = bench.wallet_balance(bench.team01);
        bench
            .service
            .mint_cards_for_address(bench.owner, bench.team01, 15)
            .unwrap();
        assert_eq!(bench.wallet_balance(bench.team01), before);
        assert_eq!(bench.engine_balance(), Wei::zero());
    }

    // =========================================================================
    // FREE MINT STAGE (allowlisted, price zero)
    // =========================================================================

    #[test]
    fn test_voucher_for_future_phase_is_not_authorized() {
        let bench = TestBench::deploy_after_airdrop();
        // Voucher names "Free Mint" but the current phase is "Initialize":
        // the digest the engine checks differs, so recovery mismatches.
        let voucher = bench.voucher(bench.free01, "Free Mint");
        assert_eq!(
            bench
                .service
                .mint_cards(bench.free01, &voucher, 1, Wei::zero()),
            Err(MintError::NotAuthorized)
        );
    }

    #[test]
    fn test_set_phase_updates_every_field() {
        let bench = TestBench::deploy_after_airdrop();
        bench.set_phase(free_mint_phase());

        let s = &bench.service;
        assert_eq!(s.current_phase_name(), "Free Mint");
        assert_eq!(s.current_phase_price(), Wei::zero());
        assert_eq!(s.current_phase_max_mint_per_address(), 5);
        assert_eq!(s.current_phase_max_supply(), 15);
    }

    #[test]
    fn test_public_path_closed_during_allowlisted_phase() {
        let bench = TestBench::deploy_after_airdrop();
        bench.set_phase(free_mint_phase());

        // Rejected with or without attached value
        assert_eq!(
            bench.service.mint_cards_public(bench.free01, 1, Wei::zero()),
            Err(MintError::NotPublicPhase)
        );
        assert_eq!(
            bench.service.mint_cards_public(bench.free01, 1, ether(1)),
            Err(MintError::NotPublicPhase)
        );
    }

    #[test]
    fn test_voucher_mint_assigns_sequential_ids() {
        let bench = TestBench::deploy_after_airdrop();
        bench.set_phase(free_mint_phase());
        let s = &bench.service;

        let v01 = bench.voucher(bench.free01, "Free Mint");
        let v02 = bench.voucher(bench.free02, "Free Mint");
        s.mint_cards(bench.free01, &v01, 1, Wei::zero()).unwrap();
        s.mint_cards(bench.free02, &v02, 1, Wei::zero()).unwrap();

        assert_eq!(s.owner_of(16), Some(bench.free01));
        assert_eq!(s.owner_of(17), Some(bench.free02));
        assert_eq!(s.total_supply(), 17);
    }

    #[test]
    fn test_bulk_voucher_mint_respects_address_cap() {
        let bench = TestBench::deploy_after_airdrop();
        bench.set_phase(free_mint_phase());
        let s = &bench.service;

        let v01 = bench.voucher(bench.free01, "Free Mint");
        let v02 = bench.voucher(bench.free02, "Free Mint");
        s.mint_cards(bench.free01, &v01, 1, Wei::zero()).unwrap();
        s.mint_cards(bench.free02, &v02, 1, Wei::zero()).unwrap();

        // One over the per-address cap of 5
        assert_eq!(
            s.mint_cards(bench.free01, &v01, 5, Wei::zero()),
            Err(MintError::OverPhaseLimit)
        );
        s.mint_cards(bench.free01, &v01, 4, Wei::zero()).unwrap();

        assert_eq!(
            s.mint_cards(bench.free02, &v02, 5, Wei::zero()),
            Err(MintError::OverPhaseLimit)
        );
        s.mint_cards(bench.free02, &v02, 4, Wei::zero()).unwrap();

        for id in 18..=21 {
            assert_eq!(s.owner_of(id), Some(bench.free01));
        }
        for id in 22..=25 {
            assert_eq!(s.owner_of(id), Some(bench.free02));
        }
        assert_eq!(s.total_supply(), 25);
    }

    #[test]
    fn test_address_cap_survives_transferring_tokens_away() {
        let bench = TestBench::deploy_after_airdrop();
        bench.set_phase(free_mint_phase());
        let s = &bench.service;

        let v01 = bench.voucher(bench.free01, "Free Mint");
        s.mint_cards(bench.free01, &v01, 5, Wei::zero()).unwrap();

        // Hand the first token to free02; quota is consumption-based
        let first = s.token_of_owner_by_index(bench.free01, 0).unwrap();
        s.ownership()
            .transfer(bench.free01, bench.free02, first)
            .unwrap();
        assert_eq!(s.owner_of(first), Some(bench.free02));

        assert_eq!(
            s.mint_cards(bench.free01, &v01, 1, Wei::zero()),
            Err(MintError::OverPhaseLimit)
        );
        assert_eq!(s.balance_of(bench.free01), 4);
        assert_eq!(s.balance_of(bench.free02), 1);
        assert_eq!(s.total_supply(), 20);
    }

    #[test]
    fn test_overpaying_a_free_phase_charges_nothing() {
        let bench = TestBench::deploy_after_airdrop();
        bench.set_phase(free_mint_phase());
        let s = &bench.service;

        let voucher = bench.voucher(bench.team02, "Free Mint");
        let before = bench.wallet_balance(bench.team02);
        let receipt = s.mint_cards(bench.team02, &voucher, 5, ether(1)).unwrap();

        assert_eq!(receipt.charged, Wei::zero());
        for id in receipt.tokens.ids() {
            assert_eq!(s.owner_of(id), Some(bench.team02));
        }
        // The attached ether never left the wallet
        assert_eq!(bench.wallet_balance(bench.team02), before);
        assert_eq!(bench.engine_balance(), Wei::zero());
    }

    #[test]
    fn test_overpayment_on_paid_phase_keeps_only_the_price() {
        let bench = TestBench::deploy_after_airdrop();
        bench.set_phase(Phase {
            name: "Presale".to_owned(),
            kind: PhaseKind::Allowlisted,
            unit_price: milli_ether(200),
            max_mint_per_address: 5,
            max_supply: 15,
        });
        let s = &bench.service;

        let voucher = bench.voucher(bench.free01, "Presale");
        let before = bench.wallet_balance(bench.free01);
        let receipt = s.mint_cards(bench.free01, &voucher, 2, ether(1)).unwrap();

        // 2 x 0.2 ether collected; the 0.6 ether overpayment stays put
        assert_eq!(receipt.charged, milli_ether(400));
        assert_eq!(
            bench.wallet_balance(bench.free01),
            before - milli_ether(400)
        );
        assert_eq!(bench.engine_balance(), milli_ether(400));
        assert_eq!(s.held_balance(), milli_ether(400));
    }

    #[test]
    fn test_underpaying_an_allowlisted_phase_is_rejected() {
        let bench = TestBench::deploy_after_airdrop();
        bench.set_phase(Phase {
            name: "Presale".to_owned(),
            kind: PhaseKind::Allowlisted,
            unit_price: milli_ether(200),
            max_mint_per_address: 5,
            max_supply: 15,
        });

        let voucher = bench.voucher(bench.free01, "Presale");
        assert_eq!(
            bench
                .service
                .mint_cards(bench.free01, &voucher, 2, milli_ether(399)),
            Err(MintError::InsufficientPayment)
        );
        assert_eq!(bench.service.total_supply(), 15);
    }

    #[test]
    fn test_garbage_signature_is_not_authorized() {
        let bench = TestBench::deploy_after_airdrop();
        bench.set_phase(free_mint_phase());

        let mut forged = bench.voucher(bench.free01, "Free Mint");
        forged.r[0] ^= 0x01;
        assert_eq!(
            bench
                .service
                .mint_cards(bench.free01, &forged, 1, Wei::zero()),
            Err(MintError::NotAuthorized)
        );
    }

    #[test]
    fn test_voucher_is_not_transferable_between_claimants() {
        let bench = TestBench::deploy_after_airdrop();
        bench.set_phase(free_mint_phase());

        // free02 presents free01's voucher
        let voucher = bench.voucher(bench.free01, "Free Mint");
        assert_eq!(
            bench
                .service
                .mint_cards(bench.free02, &voucher, 1, Wei::zero()),
            Err(MintError::NotAuthorized)
        );
    }

    // =========================================================================
    // PUBLIC SALE STAGE
    // =========================================================================

    #[test]
    fn test_paths_closed_before_public_phase_is_set() {
        let bench = TestBench::deploy_after_airdrop();
        bench.set_phase(free_mint_phase());

        // A voucher for the future public phase mismatches the current digest
        let voucher = bench.voucher(bench.pub01, "Public Sale");
        assert_eq!(
            bench
                .service
                .mint_cards(bench.pub01, &voucher, 1, Wei::zero()),
            Err(MintError::NotAuthorized)
        );
        assert_eq!(
            bench.service.mint_cards_public(bench.pub01, 1, Wei::zero()),
            Err(MintError::NotPublicPhase)
        );
    }

    #[test]
    fn test_public_phase_fields() {
        let bench = TestBench::deploy_in_public_sale();
        let s = &bench.service;
        assert_eq!(s.current_phase_name(), "Public Sale");
        assert_eq!(s.current_phase_price(), milli_ether(500));
        assert_eq!(s.current_phase_max_mint_per_address(), 5);
        assert_eq!(s.current_phase_max_supply(), 10);
        assert_eq!(s.total_supply(), 30);
    }

    #[test]
    fn test_voucher_path_closed_during_public_phase() {
        let bench = TestBench::deploy_in_public_sale();
        let voucher = bench.voucher(bench.pub01, "Public Sale");

        // Even a voucher matching the current phase name is rejected: the
        // public phase must be minted through the public path.
        assert_eq!(
            bench
                .service
                .mint_cards(bench.pub01, &voucher, 1, Wei::zero()),
            Err(MintError::NotLegalPhase)
        );
        assert_eq!(
            bench
                .service
                .mint_cards(bench.pub01, &voucher, 1, milli_ether(500)),
            Err(MintError::NotLegalPhase)
        );
        assert_eq!(bench.service.total_supply(), 30);
    }

    #[test]
    fn test_public_mint_requires_payment() {
        let bench = TestBench::deploy_in_public_sale();
        let s = &bench.service;

        assert_eq!(
            s.mint_cards_public(bench.pub01, 1, Wei::zero()),
            Err(MintError::InsufficientPayment)
        );

        s.mint_cards_public(bench.pub01, 1, milli_ether(500)).unwrap();
        s.mint_cards_public(bench.pub02, 1, milli_ether(500)).unwrap();
        assert_eq!(s.owner_of(31), Some(bench.pub01));
        assert_eq!(s.owner_of(32), Some(bench.pub02));
        assert_eq!(s.total_supply(), 32);
    }

    #[test]
    fn test_public_bulk_mint_to_the_collection_cap() {
        let bench = TestBench::deploy_in_public_sale();
        let s = &bench.service;
        let price = s.current_phase_price();

        s.mint_cards_public(bench.pub01, 1, price).unwrap();
        s.mint_cards_public(bench.pub02, 1, price).unwrap();

        // Underpayment is reported before the per-address cap
        assert_eq!(
            s.mint_cards_public(bench.pub01, 4, Wei::zero()),
            Err(MintError::InsufficientPayment)
        );
        // One over the per-address cap, fully paid
        assert_eq!(
            s.mint_cards_public(bench.pub01, 5, price * Wei::from(5u64)),
            Err(MintError::OverPhaseLimit)
        );

        s.mint_cards_public(bench.pub01, 4, price * Wei::from(4u64)).unwrap();
        s.mint_cards_public(bench.pub02, 4, price * Wei::from(4u64)).unwrap();

        for id in 33..=36 {
            assert_eq!(s.owner_of(id), Some(bench.pub01));
        }
        for id in 37..=40 {
            assert_eq!(s.owner_of(id), Some(bench.pub02));
        }
        assert_eq!(s.total_supply(), 40);
    }

    #[test]
    fn test_public_cap_survives_transferring_tokens_away() {
        let bench = TestBench::deploy_in_public_sale();
        let s = &bench.service;
        let price = s.current_phase_price();

        s.mint_cards_public(bench.pub01, 5, price * Wei::from(5u64)).unwrap();
        let first = s.token_of_owner_by_index(bench.pub01, 0).unwrap();
        s.ownership()
            .transfer(bench.pub01, bench.pub02, first)
            .unwrap();

        assert_eq!(
            s.mint_cards_public(bench.pub01, 1, price),
            Err(MintError::OverPhaseLimit)
        );
        assert_eq!(s.balance_of(bench.pub01), 4);
        assert_eq!(s.balance_of(bench.pub02), 1);
    }

    #[test]
    fn test_collection_cap_closes_the_sale() {
        let bench = TestBench::deploy_in_public_sale();
        let s = &bench.service;
        let price = s.current_phase_price();

        s.mint_cards_public(bench.pub01, 5, price * Wei::from(5u64)).unwrap();
        s.mint_cards_public(bench.pub02, 5, price * Wei::from(5u64)).unwrap();
        assert_eq!(s.total_supply(), 40);

        // Payment is still checked first; with payment, capacity rejects
        assert_eq!(
            s.mint_cards_public(bench.pub03, 1, Wei::zero()),
            Err(MintError::InsufficientPayment)
        );
        assert_eq!(
            s.mint_cards_public(bench.pub03, 1, price),
            Err(MintError::OverPhaseLimit)
        );
        assert_eq!(s.total_supply(), 40);
    }

    #[test]
    fn test_airdrop_rejected_after_collection_cap() {
        let bench = TestBench::deploy_in_public_sale();
        let s = &bench.service;
        let price = s.current_phase_price();

        s.mint_cards_public(bench.pub01, 5, price * Wei::from(5u64)).unwrap();
        s.mint_cards_public(bench.pub02, 5, price * Wei::from(5u64)).unwrap();

        assert_eq!(
            s.mint_cards_for_address(bench.owner, bench.pub03, 1),
            Err(MintError::DevAllowanceExhausted)
        );
        assert_eq!(s.total_supply(), 40);
    }

    #[test]
    fn test_engine_holds_exactly_the_collected_payments() {
        let bench = TestBench::deploy_in_public_sale();
        let s = &bench.service;
        let price = s.current_phase_price();

        s.mint_cards_public(bench.pub01, 5, price * Wei::from(5u64)).unwrap();
        s.mint_cards_public(bench.pub02, 5, price * Wei::from(5u64)).unwrap();

        // Free stage contributed nothing; the public sale 10 x 0.5 ether
        let expected = price * Wei::from(10u64);
        assert_eq!(bench.engine_balance(), expected);
        assert_eq!(s.held_balance(), expected);
    }

    // =========================================================================
    // INVARIANTS
    // =========================================================================

    #[test]
    fn test_total_supply_never_exceeds_the_cap() {
        let bench = TestBench::deploy_in_public_sale();
        let s = &bench.service;
        let price = s.current_phase_price();

        // A storm of mixed calls, many doomed; the cap must hold throughout
        for round in 0..8u64 {
            let _ = s.mint_cards_public(bench.pub01, 1 + round % 5, price * Wei::from(5u64));
            let _ = s.mint_cards_public(bench.pub02, 5, price * Wei::from(5u64));
            let _ = s.mint_cards_public(bench.pub03, 1, price * Wei::from(5u64));
            let _ = s.mint_cards_for_address(bench.owner, bench.pub03, 5);
            assert!(s.total_supply() <= s.collection_max_supply());
        }
        assert_eq!(s.total_supply(), 40);
    }

    #[test]
    fn test_phase_replacement_resets_address_quota() {
        let bench = TestBench::deploy_after_airdrop();
        bench.set_phase(free_mint_phase());
        let s = &bench.service;

        let voucher = bench.voucher(bench.free01, "Free Mint");
        s.mint_cards(bench.free01, &voucher, 5, Wei::zero()).unwrap();
        assert_eq!(
            s.mint_cards(bench.free01, &voucher, 1, Wei::zero()),
            Err(MintError::OverPhaseLimit)
        );

        // Replacing the phase (even with identical rules) reopens the quota,
        // while lifetime counters keep the history
        bench.set_phase(free_mint_phase());
        s.mint_cards(bench.free01, &voucher, 5, Wei::zero()).unwrap();
        assert_eq!(s.number_minted(bench.free01), 10);
    }

    #[test]
    fn test_phase_supply_cap_binds_independently_of_address_caps() {
        let bench = TestBench::deploy_after_airdrop();
        bench.set_phase(Phase {
            name: "Tiny Drop".to_owned(),
            kind: PhaseKind::Public,
            unit_price: Wei::zero(),
            max_mint_per_address: 5,
            max_supply: 6,
        });
        let s = &bench.service;

        s.mint_cards_public(bench.pub01, 5, Wei::zero()).unwrap();
        // pub02 has untouched address quota, but only one unit remains in
        // the phase
        assert_eq!(
            s.mint_cards_public(bench.pub02, 2, Wei::zero()),
            Err(MintError::OverPhaseLimit)
        );
        s.mint_cards_public(bench.pub02, 1, Wei::zero()).unwrap();
        assert_eq!(s.total_supply(), 21);
    }
}
