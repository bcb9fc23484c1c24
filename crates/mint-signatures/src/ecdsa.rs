//! # ECDSA Recovery (secp256k1)
//!
//! Signature parsing, validation, and signer recovery for allowlist
//! vouchers.
//!
//! ## Security Notes
//!
//! - **Malleability (EIP-2)**: S must be strictly below the half curve
//!   order; high-S signatures are rejected before recovery.
//! - **Scalar range**: R and S must be in `[1, n-1]`.
//! - Recovery uses the `k256` crate; this module never constructs keys.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use shared_types::{Address, Hash};

use crate::digest::keccak256;
use crate::errors::SignatureError;

/// secp256k1 curve order n.
pub(crate) const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (malleability boundary).
pub(crate) const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

// =============================================================================
// SIGNATURE VALUE OBJECT
// =============================================================================

/// A recoverable secp256k1 signature in Ethereum `r || s || v` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcdsaSignature {
    /// R component (32 bytes, big-endian).
    pub r: [u8; 32],
    /// S component (32 bytes, big-endian, low-S normalized).
    pub s: [u8; 32],
    /// Recovery id: 0, 1, 27, or 28.
    pub v: u8,
}

impl EcdsaSignature {
    /// Parses the 65-byte `r || s || v` wire form.
    ///
    /// # Errors
    ///
    /// [`SignatureError::InvalidFormat`] if the slice is not 65 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != 65 {
            return Err(SignatureError::InvalidFormat);
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v: bytes[64] })
    }

    /// Parses a hex string (with or without a `0x` prefix).
    ///
    /// # Errors
    ///
    /// [`SignatureError::InvalidFormat`] on bad hex or wrong length.
    pub fn from_hex(text: &str) -> Result<Self, SignatureError> {
        let stripped = text.strip_prefix("0x").unwrap_or(text);
        let bytes = hex::decode(stripped).map_err(|_| SignatureError::InvalidFormat)?;
        Self::from_bytes(&bytes)
    }

    /// Serializes to the 65-byte `r || s || v` wire form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

// =============================================================================
// RECOVERY
// =============================================================================

/// Recover the signing address for `digest` from `signature`.
///
/// # Errors
///
/// - [`SignatureError::InvalidFormat`] if R or S is outside `[1, n-1]`
/// - [`SignatureError::MalleableSignature`] if S is in the upper half order
/// - [`SignatureError::InvalidRecoveryId`] for v outside {0, 1, 27, 28}
/// - [`SignatureError::RecoveryFailed`] if no public key recovers
pub fn recover_address(digest: &Hash, signature: &EcdsaSignature) -> Result<Address, SignatureError> {
    if !is_valid_scalar(&signature.r) || !is_valid_scalar(&signature.s) {
        return Err(SignatureError::InvalidFormat);
    }
    if !is_low_s(&signature.s) {
        return Err(SignatureError::MalleableSignature);
    }
    let recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);
    let sig = Signature::from_slice(&sig_bytes).map_err(|_| SignatureError::InvalidFormat)?;

    let key = VerifyingKey::recover_from_prehash(digest.as_bytes(), &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_key(&key))
}

/// Check that `signature` over `digest` recovers exactly `expected`.
///
/// Returns false for any malformed signature, any mismatch, and always for
/// the zero address (an unset signer authorizes nobody).
#[must_use]
pub fn verify_signer(digest: &Hash, signature: &EcdsaSignature, expected: Address) -> bool {
    if expected.is_zero() {
        return false;
    }
    match recover_address(digest, signature) {
        Ok(recovered) => recovered == expected,
        Err(_) => false,
    }
}

/// Derive the Ethereum-style address of a public key:
/// the last 20 bytes of keccak256 over the uncompressed point (sans prefix).
#[must_use]
pub fn address_from_key(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let digest = keccak256(&point.as_bytes()[1..]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest.as_bytes()[12..]);
    Address::new(bytes)
}

// =============================================================================
// SCALAR VALIDATION
// =============================================================================

/// Big-endian byte arrays compare like the integers they encode, so plain
/// lexicographic comparison suffices for range checks here. Verification
/// inputs are public; constant-time treatment is not required.
pub(crate) fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    scalar != &[0u8; 32] && scalar[..] < SECP256K1_ORDER[..]
}

pub(crate) fn is_low_s(s: &[u8; 32]) -> bool {
    // Strictly below half order per EIP-2.
    s[..] < SECP256K1_HALF_ORDER[..]
}

fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let byte = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        other => return Err(SignatureError::InvalidRecoveryId(other)),
    };
    RecoveryId::try_from(byte).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

// =============================================================================
// TESTS
// =============================================================================
