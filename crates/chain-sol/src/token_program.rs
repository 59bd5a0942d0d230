//! Instruction builders for the deployed token program.
//!
//! The program exposes three methods: `create_token`, `mint_token`, and
//! `transfer_tokens`. Every account it reads is resolved here, including the
//! derived metadata and associated token accounts, so callers only supply
//! the wallets, the mint, and the arguments.

use crate::anchor::{encode_instruction_data, AnchorArg};
use crate::error::SolError;
use crate::spl_token::{
    derive_associated_token_address, derive_metadata_address, ASSOCIATED_TOKEN_PROGRAM_ID,
    RENT_SYSVAR_ID, TOKEN_METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use crate::transaction::{SolAccountMeta, SolInstruction, SYSTEM_PROGRAM_ID};

/// Metadata account limits enforced by the token metadata program.
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;

/// Name, symbol, and off-chain JSON uri attached to a new mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

impl TokenMetadata {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            uri: uri.into(),
        }
    }

    /// Reject values the metadata program would refuse.
    pub fn validate(&self) -> Result<(), SolError> {
        for (field, value, max) in [
            ("name", &self.name, MAX_NAME_LENGTH),
            ("symbol", &self.symbol, MAX_SYMBOL_LENGTH),
            ("uri", &self.uri, MAX_URI_LENGTH),
        ] {
            if value.trim().is_empty() {
                return Err(SolError::InvalidArgument(format!("{field} must not be empty")));
            }
            if value.len() > max {
                return Err(SolError::InvalidArgument(format!(
                    "{field} is {} bytes, limit is {max}",
                    value.len()
                )));
            }
        }
        Ok(())
    }
}

/// Handle on a deployment of the token program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenProgram {
    program_id: [u8; 32],
}

impl TokenProgram {
    pub fn new(program_id: [u8; 32]) -> Self {
        Self { program_id }
    }

    /// `create_token(name, symbol, uri)`.
    ///
    /// Both `payer` and `mint` must sign: the program allocates the mint
    /// account at the mint's own address.
    pub fn create_token(
        &self,
        payer: &[u8; 32],
        mint: &[u8; 32],
        metadata: &TokenMetadata,
    ) -> Result<SolInstruction, SolError> {
        metadata.validate()?;
        let metadata_account = derive_metadata_address(mint)?;

        Ok(SolInstruction {
            program_id: self.program_id,
            accounts: vec![
                SolAccountMeta::signer(*payer),
                SolAccountMeta::signer(*mint),
                SolAccountMeta::writable(metadata_account),
                SolAccountMeta::readonly(TOKEN_PROGRAM_ID),
                SolAccountMeta::readonly(TOKEN_METADATA_PROGRAM_ID),
                SolAccountMeta::readonly(SYSTEM_PROGRAM_ID),
                SolAccountMeta::readonly(RENT_SYSVAR_ID),
            ],
            data: encode_instruction_data(
                "create_token",
                &[
                    AnchorArg::Str(&metadata.name),
                    AnchorArg::Str(&metadata.symbol),
                    AnchorArg::Str(&metadata.uri),
                ],
            ),
        })
    }

    /// `mint_token(amount)` into the recipient's associated token account,
    /// which the program creates when missing.
    pub fn mint_token(
        &self,
        mint_authority: &[u8; 32],
        recipient: &[u8; 32],
        mint: &[u8; 32],
        amount: u64,
    ) -> Result<SolInstruction, SolError> {
        require_amount(amount)?;
        let recipient_ata = derive_associated_token_address(recipient, mint)?;

        Ok(SolInstruction {
            program_id: self.program_id,
            accounts: vec![
                SolAccountMeta::signer(*mint_authority),
                SolAccountMeta::readonly(*recipient),
                SolAccountMeta::writable(*mint),
                SolAccountMeta::writable(recipient_ata),
                SolAccountMeta::readonly(TOKEN_PROGRAM_ID),
                SolAccountMeta::readonly(ASSOCIATED_TOKEN_PROGRAM_ID),
                SolAccountMeta::readonly(SYSTEM_PROGRAM_ID),
            ],
            data: encode_instruction_data("mint_token", &[AnchorArg::U64(amount)]),
        })
    }

    /// `transfer_tokens(amount)` from the sender's associated token account
    /// to the recipient's.
    pub fn transfer_tokens(
        &self,
        sender: &[u8; 32],
        recipient: &[u8; 32],
        mint: &[u8; 32],
        amount: u64,
    ) -> Result<SolInstruction, SolError> {
        require_amount(amount)?;
        let sender_ata = derive_associated_token_address(sender, mint)?;
        let recipient_ata = derive_associated_token_address(recipient, mint)?;

        Ok(SolInstruction {
            program_id: self.program_id,
            accounts: vec![
                SolAccountMeta::signer(*sender),
                SolAccountMeta::readonly(*recipient),
                SolAccountMeta::writable(*mint),
                SolAccountMeta::writable(sender_ata),
                SolAccountMeta::writable(recipient_ata),
                SolAccountMeta::readonly(TOKEN_PROGRAM_ID),
                SolAccountMeta::readonly(ASSOCIATED_TOKEN_PROGRAM_ID),
                SolAccountMeta::readonly(SYSTEM_PROGRAM_ID),
            ],
            data: encode_instruction_data("transfer_tokens", &[AnchorArg::U64(amount)]),
        })
    }
}

fn require_amount(amount: u64) -> Result<(), SolError> {
    if amount == 0 {
        return Err(SolError::InvalidArgument("amount must be > 0".into()));
    }
    Ok(())
}
