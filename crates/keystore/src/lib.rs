//! # keystore
//!
//! Loading and generating the Ed25519 keypairs that sign token program
//! transactions. Keypair files use the Solana CLI layout: a JSON array of
//! 64 integers, secret seed followed by public key.

pub mod error;
pub mod keypair;
pub mod path;
pub mod random;

pub use error::KeystoreError;
pub use keypair::Keypair;
pub use path::{default_keypair_path, expand_home};
