//! # CardMint Test Suite
//!
//! Unified test crate for the minting engine.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Deployed-collection test bench and wei helpers
//! └── integration/      # End-to-end flows
//!     ├── e2e_minting.rs    # Deployment, dev airdrop, free mint, public sale
//!     └── admin_flows.rs    # URI/signer rotation, receive, withdrawal
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p mint-tests
//!
//! # By category
//! cargo test -p mint-tests integration::e2e_minting::
//! cargo test -p mint-tests integration::admin_flows::
//! ```

#![allow(dead_code)]

pub mod integration;
