//! Ed25519 keypairs in the Solana CLI file format.

use std::fmt;
use std::fs;
use std::path::Path;

use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

use crate::error::KeystoreError;
use crate::random::random_seed;

/// Length of a serialized keypair: 32-byte seed followed by 32-byte pubkey.
pub const KEYPAIR_LENGTH: usize = 64;

/// A signing keypair. The secret half never appears in `Debug` output.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a fresh keypair from the OS RNG.
    pub fn generate() -> Self {
        Self::from_seed(&random_seed())
    }

    /// Build a keypair from its 32-byte secret seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Parse the 64-byte `seed || pubkey` layout.
    ///
    /// The stored public half must match the key derived from the seed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeystoreError> {
        let bytes: Zeroizing<[u8; KEYPAIR_LENGTH]> =
            Zeroizing::new(bytes.try_into().map_err(|_| {
                KeystoreError::InvalidKeypair(format!(
                    "expected {KEYPAIR_LENGTH} bytes, got {}",
                    bytes.len()
                ))
            })?);

        let signing_key = SigningKey::from_keypair_bytes(&bytes).map_err(|_| {
            KeystoreError::InvalidKeypair("public key does not match secret key".into())
        })?;

        Ok(Self { signing_key })
    }

    /// Read a keypair file written by `solana-keygen`.
    pub fn read_from_file(path: &Path) -> Result<Self, KeystoreError> {
        let contents = Zeroizing::new(fs::read_to_string(path).map_err(|source| {
            KeystoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?);

        let bytes: Zeroizing<Vec<u8>> = Zeroizing::new(
            serde_json::from_str(contents.trim()).map_err(|e| KeystoreError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?,
        );

        let keypair = Self::from_bytes(&bytes).map_err(|e| KeystoreError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        tracing::debug!(
            path = %path.display(),
            pubkey = %keypair.pubkey_string(),
            "keypair loaded"
        );
        Ok(keypair)
    }

    /// The 64-byte `seed || pubkey` form, wiped on drop.
    pub fn to_bytes(&self) -> Zeroizing<[u8; KEYPAIR_LENGTH]> {
        Zeroizing::new(self.signing_key.to_keypair_bytes())
    }

    /// The raw 32-byte public key (the account address).
    pub fn pubkey(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// The public key in Base58.
    pub fn pubkey_string(&self) -> String {
        bs58::encode(self.pubkey()).into_string()
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("pubkey", &self.pubkey_string())
            .finish_non_exhaustive()
    }
}
