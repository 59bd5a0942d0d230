//! Address and signature text encoding.
//!
//! An address is the Base58 rendering of 32 raw bytes, either an Ed25519
//! public key or a program-derived address. Transaction signatures use the
//! same alphabet over 64 bytes.

use crate::error::SolError;

/// Decode a Base58 address into its 32-byte form.
pub fn address_to_bytes(address: &str) -> Result<[u8; 32], SolError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(SolError::InvalidAddress("address is empty".into()));
    }

    let bytes = bs58::decode(trimmed)
        .into_vec()
        .map_err(|e| SolError::InvalidAddress(format!("{trimmed}: base58 decode failed: {e}")))?;

    bytes.try_into().map_err(|v: Vec<u8>| {
        SolError::InvalidAddress(format!("{trimmed}: expected 32 bytes, got {}", v.len()))
    })
}

/// Encode 32 bytes as a Base58 address.
pub fn bytes_to_address(bytes: &[u8; 32]) -> String {
    bs58::encode(bytes).into_string()
}

/// Check that `address` decodes to exactly 32 bytes.
pub fn validate_address(address: &str) -> Result<(), SolError> {
    address_to_bytes(address).map(|_| ())
}

/// Encode a 64-byte Ed25519 signature the way RPC nodes report it.
pub fn signature_to_string(signature: &[u8; 64]) -> String {
    bs58::encode(signature).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_program_is_all_zero_bytes() {
        assert_eq!(bytes_to_address(&[0u8; 32]), "11111111111111111111111111111111");
    }

    #[test]
    fn program_id_decodes_to_known_bytes() {
        let bytes = address_to_bytes("2V3eUpxJK3n1ionrg2xsy5HAVuHzxArnZ3Xg6vbV5Pzb").unwrap();
        assert_eq!(&bytes[..4], &[0x16, 0x0a, 0xf1, 0x10]);
        assert_eq!(&bytes[28..], &[0xc1, 0x1b, 0xae, 0x84]);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let padded = "  TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA\n";
        let bytes = address_to_bytes(padded).unwrap();
        assert_eq!(
            bytes_to_address(&bytes),
            "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
        );
    }

    #[test]
    fn garbage_is_rejected() {
        let err = address_to_bytes("not-a-valid-address!!!").unwrap_err();
        assert!(err.to_string().contains("base58 decode failed"));
    }

    #[test]
    fn short_decoding_is_rejected() {
        // "1" is a single zero byte.
        let err = validate_address("1").unwrap_err();
        assert!(err.to_string().contains("expected 32 bytes, got 1"));
    }

    #[test]
    fn empty_address_is_rejected() {
        assert!(validate_address("   ").is_err());
    }

    #[test]
    fn signature_encoding_is_base58() {
        let encoded = signature_to_string(&[0u8; 64]);
        assert_eq!(encoded, "1".repeat(64));

        let encoded = signature_to_string(&[0xffu8; 64]);
        assert!(bs58::decode(&encoded).into_vec().unwrap().len() == 64);
    }
}
