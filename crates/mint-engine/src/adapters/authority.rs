//! # Recovery Authority
//!
//! Production [`SignatureAuthority`]: secp256k1 public-key recovery via
//! `mint-signatures`, compared against the expected identity.

use shared_types::{Address, Hash};

use crate::ports::outbound::SignatureAuthority;
use mint_signatures::EcdsaSignature;

/// Verifies vouchers by recovering the signer address from the signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecoveryAuthority;

impl RecoveryAuthority {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SignatureAuthority for RecoveryAuthority {
    fn verify(&self, digest: &Hash, signature: &EcdsaSignature, expected: Address) -> bool {
        mint_signatures::verify_signer(digest, signature, expected)
    }
}
