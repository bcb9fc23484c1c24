//! # Mint Signatures
//!
//! Allowlist voucher cryptography for CardMint.
//!
//! A mint allowlist is enforced off-chain: a trusted backend signs a voucher
//! binding `(collection name, claimant address, phase name)` and the engine
//! admits the claimant only if the voucher recovers to the configured root
//! signer. This crate provides both halves of that handshake:
//!
//! - [`allowlist_digest`]: the canonical Keccak-256 digest over the packed
//!   `(string, address, string)` tuple.
//! - [`recover_address`] / [`verify_signer`]: secp256k1 public-key recovery
//!   with scalar range and low-S malleability validation.
//! - [`BackendSigner`]: the signing side, used by the allowlist backend and
//!   by tests.
//!
//! Verification is total: malformed or mismatching signatures yield `false`
//! (or a typed error), never a panic.

pub mod digest;
pub mod ecdsa;
pub mod errors;
pub mod signer;

pub use digest::{allowlist_digest, keccak256};
pub use ecdsa::{recover_address, verify_signer, EcdsaSignature};
pub use errors::SignatureError;
pub use signer::BackendSigner;
