//! # Signature Errors
//!
//! Error types for voucher signature handling.

use thiserror::Error;

/// Errors that can occur while parsing or recovering a signature.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature encoding is invalid (wrong length, scalar out of range).
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has a high S value (EIP-2 malleability protection).
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28).
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover a public key from the signature.
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Signing failed (degenerate key or digest).
    #[error("Signing failed")]
    SigningFailed,
}
