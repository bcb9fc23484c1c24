//! # Backend Signer
//!
//! The signing half of the allowlist handshake. In production this runs in
//! the allowlist backend, which hands signed vouchers to approved wallets;
//! the engine later admits whoever presents a voucher that recovers to the
//! configured root signer. Tests use it to mint throwaway signer identities.

use k256::ecdsa::SigningKey;
use shared_types::{Address, Hash};

use crate::digest::allowlist_digest;
use crate::ecdsa::{address_from_key, EcdsaSignature};
use crate::errors::SignatureError;

/// A secp256k1 signing identity issuing allowlist vouchers.
pub struct BackendSigner {
    key: SigningKey,
}

impl BackendSigner {
    /// Generates a fresh random signer.
    #[must_use]
    pub fn random() -> Self {
        Self {
            key: SigningKey::random(&mut rand::thread_rng()),
        }
    }

    /// Loads a signer from a 32-byte secret scalar.
    ///
    /// # Errors
    ///
    /// [`SignatureError::InvalidFormat`] if the scalar is zero or out of
    /// range for the curve.
    pub fn from_bytes(secret: &[u8; 32]) -> Result<Self, SignatureError> {
        let key = SigningKey::from_slice(secret).map_err(|_| SignatureError::InvalidFormat)?;
        Ok(Self { key })
    }

    /// The address vouchers from this signer recover to.
    #[must_use]
    pub fn address(&self) -> Address {
        address_from_key(self.key.verifying_key())
    }

    /// Signs an arbitrary digest, producing a low-S normalized recoverable
    /// signature.
    ///
    /// # Errors
    ///
    /// [`SignatureError::SigningFailed`] if the underlying signature
    /// operation fails.
    pub fn sign(&self, digest: &Hash) -> Result<EcdsaSignature, SignatureError> {
        let (sig, recid) = self
            .key
            .sign_prehash_recoverable(digest.as_bytes())
            .map_err(|_| SignatureError::SigningFailed)?;

        // Normalize to low S (EIP-2); flipping S flips the recovered point's
        // y-parity, so the recovery id flips with it.
        let (sig, v) = match sig.normalize_s() {
            Some(normalized) => (normalized, if recid.to_byte() == 0 { 28 } else { 27 }),
            None => (sig, 27 + recid.to_byte()),
        };

        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(EcdsaSignature { r, s, v })
    }

    /// Issues a voucher admitting `claimant` to `phase_name` of the named
    /// collection.
    ///
    /// # Errors
    ///
    /// Propagates [`SignatureError::SigningFailed`] from signing.
    pub fn voucher(
        &self,
        collection_name: &str,
        claimant: Address,
        phase_name: &str,
    ) -> Result<EcdsaSignature, SignatureError> {
        self.sign(&allowlist_digest(collection_name, claimant, phase_name))
    }
}
