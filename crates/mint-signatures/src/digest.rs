//! # Voucher Digest
//!
//! Canonical message construction for allowlist vouchers.
//!
//! The backend and the engine must agree bit-for-bit on what is signed. The
//! scheme is Keccak-256 over the packed encoding of the tuple
//! `(string collection_name, address claimant, string phase_name)`:
//! strings contribute their raw UTF-8 bytes, the address its 20 bytes, with
//! no length prefixes or padding. This matches the Solidity
//! `abi.encodePacked` convention the original backend used, so vouchers
//! issued against the deployed collection remain valid.

use sha3::{Digest, Keccak256};
use shared_types::{Address, Hash};

/// Keccak-256 over arbitrary bytes.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let out = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&out);
    Hash::new(bytes)
}

/// Digest a voucher for `claimant` to mint during `phase_name` of the
/// collection `collection_name`.
///
/// Packed encoding: `name_bytes || address_bytes || phase_bytes`.
#[must_use]
pub fn allowlist_digest(collection_name: &str, claimant: Address, phase_name: &str) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(collection_name.as_bytes());
    hasher.update(claimant.as_bytes());
    hasher.update(phase_name.as_bytes());
    let out = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&out);
    Hash::new(bytes)
}
