//! Minimal Anchor instruction encoding.
//!
//! Anchor programs select a method by an 8-byte discriminator and read their
//! arguments Borsh-encoded right after it. Only the argument kinds the token
//! program takes are supported.

use sha2::{Digest, Sha256};

/// A single Borsh-encoded instruction argument.
#[derive(Debug, Clone)]
pub enum AnchorArg<'a> {
    /// Little-endian `u64`.
    U64(u64),
    /// `u32` little-endian byte length followed by UTF-8 bytes.
    Str(&'a str),
}

/// The discriminator of a global instruction: `SHA-256("global:<name>")[..8]`.
pub fn discriminator(method: &str) -> [u8; 8] {
    let hash = Sha256::digest(format!("global:{method}").as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&hash[..8]);
    out
}

/// Encode `discriminator(method) || args[0] || args[1] || ...`.
pub fn encode_instruction_data(method: &str, args: &[AnchorArg<'_>]) -> Vec<u8> {
    let mut data = Vec::with_capacity(8 + args.iter().map(encoded_len).sum::<usize>());
    data.extend_from_slice(&discriminator(method));

    for arg in args {
        match arg {
            AnchorArg::U64(value) => data.extend_from_slice(&value.to_le_bytes()),
            AnchorArg::Str(s) => {
                data.extend_from_slice(&(s.len() as u32).to_le_bytes());
                data.extend_from_slice(s.as_bytes());
            }
        }
    }

    data
}

fn encoded_len(arg: &AnchorArg<'_>) -> usize {
    match arg {
        AnchorArg::U64(_) => 8,
        AnchorArg::Str(s) => 4 + s.len(),
    }
}
