// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! Decrypted values and raw key bytes only ever live inside these wrappers,
//! so they are zeroized on drop.

pub use secure_gate::{dynamic_alias, fixed_alias, SecureConversionsExt, SecureRandomExt};

// Fixed-size secrets
fixed_alias!(KeyBytes32, 32); // 256-bit random material behind a generated key

// Dynamic secrets
dynamic_alias!(PlainText, String); // decrypted column value
dynamic_alias!(KeyMaterial, String); // one entry of the key ring
