//! Solana primitives for the token CLI.
//!
//! This crate handles address encoding, program-derived address lookup,
//! the legacy transaction wire format, and the instruction layout of the
//! token program the CLI talks to. It deliberately avoids `solana-sdk`:
//! the wire format is small enough to write by hand on top of
//! `ed25519-dalek` for signing and `bs58` for text encoding.

pub mod address;
pub mod anchor;
pub mod error;
pub mod spl_token;
pub mod token_program;
pub mod transaction;

pub use address::{address_to_bytes, bytes_to_address, signature_to_string, validate_address};
pub use error::SolError;
pub use spl_token::{
    derive_associated_token_address, derive_metadata_address, find_program_address,
    ASSOCIATED_TOKEN_PROGRAM_ID, RENT_SYSVAR_ID, TOKEN_METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
pub use token_program::{TokenMetadata, TokenProgram};
pub use transaction::{
    compile_transaction, encode_compact_u16, serialize_message, sign_transaction,
    transaction_signature, CompiledInstruction, SolAccountMeta, SolInstruction, SolTransaction,
    SYSTEM_PROGRAM_ID,
};
