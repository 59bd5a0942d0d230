//! High-level operations against the token program.
//!
//! Each call builds one instruction, compiles it with a fresh blockhash,
//! signs with the wallet (and the new mint for `create_token`), submits,
//! and waits for confirmation.

use chain_sol::{
    compile_transaction, derive_associated_token_address, sign_transaction, SolInstruction,
    TokenMetadata, TokenProgram,
};
use ed25519_dalek::SigningKey;
use keystore::Keypair;

use crate::config::Config;
use crate::error::ClientResult;
use crate::rpc::RpcClient;
use crate::types::{
    lamports_to_sol, CreatedToken, MintedTokens, TokenBalance, TransferredTokens,
};

pub struct TokenInteractor {
    config: Config,
    rpc: RpcClient,
    wallet: Keypair,
    program: TokenProgram,
}

impl TokenInteractor {
    /// Validate `config`, load the wallet keypair it points at, and connect.
    pub fn new(config: Config) -> ClientResult<Self> {
        config.validate()?;
        let path = config.keypair_path()?;
        let wallet = Keypair::read_from_file(&path)?;
        Self::with_wallet(config, wallet)
    }

    /// Like [`TokenInteractor::new`] with an already loaded wallet.
    pub fn with_wallet(config: Config, wallet: Keypair) -> ClientResult<Self> {
        config.validate()?;
        let program = TokenProgram::new(config.program_id_bytes()?);
        let rpc = RpcClient::new(&config)?;

        tracing::info!(
            cluster = %config.cluster,
            rpc_url = rpc.url(),
            wallet = %wallet.pubkey_string(),
            program_id = %config.program_id,
            "token interactor ready"
        );

        Ok(Self {
            config,
            rpc,
            wallet,
            program,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn wallet(&self) -> &Keypair {
        &self.wallet
    }

    pub fn wallet_pubkey(&self) -> [u8; 32] {
        self.wallet.pubkey()
    }

    /// Explorer link for `signature` on the configured cluster.
    pub fn explorer_url(&self, signature: &str) -> String {
        self.config
            .cluster
            .explorer_tx_url(signature, self.config.rpc_url())
    }

    async fn submit(
        &self,
        instruction: SolInstruction,
        extra_signers: &[&SigningKey],
    ) -> ClientResult<String> {
        let blockhash = self.rpc.get_latest_blockhash().await?;
        let tx = compile_transaction(&[instruction], &self.wallet_pubkey(), &blockhash)?;

        let mut signers = vec![self.wallet.signing_key()];
        signers.extend_from_slice(extra_signers);
        let wire = sign_transaction(&tx, &signers)?;

        self.rpc.send_and_confirm_transaction(&wire).await
    }

    /// Create a new mint with metadata. A fresh mint keypair co-signs.
    pub async fn create_token(
        &self,
        name: &str,
        symbol: &str,
        uri: &str,
    ) -> ClientResult<CreatedToken> {
        self.create_token_with_mint(&Keypair::generate(), name, symbol, uri)
            .await
    }

    /// Create a mint at `mint`'s address; `mint` co-signs the transaction.
    pub async fn create_token_with_mint(
        &self,
        mint: &Keypair,
        name: &str,
        symbol: &str,
        uri: &str,
    ) -> ClientResult<CreatedToken> {
        let metadata = TokenMetadata::new(name, symbol, uri);
        tracing::info!(name, symbol, mint = %mint.pubkey_string(), "creating token");

        let instruction = self
            .program
            .create_token(&self.wallet_pubkey(), &mint.pubkey(), &metadata)?;
        let signature = self.submit(instruction, &[mint.signing_key()]).await?;

        Ok(CreatedToken {
            mint: mint.pubkey_string(),
            signature,
        })
    }

    /// Mint `amount` whole tokens of `mint` to `recipient`'s token account.
    /// The program scales `amount` by the mint's decimals.
    pub async fn mint_token(
        &self,
        mint: &[u8; 32],
        recipient: &[u8; 32],
        amount: u64,
    ) -> ClientResult<MintedTokens> {
        let token_account = derive_associated_token_address(recipient, mint)?;
        tracing::info!(
            mint = %chain_sol::bytes_to_address(mint),
            recipient = %chain_sol::bytes_to_address(recipient),
            amount,
            "minting tokens"
        );

        let instruction = self
            .program
            .mint_token(&self.wallet_pubkey(), recipient, mint, amount)?;
        let signature = self.submit(instruction, &[]).await?;

        Ok(MintedTokens {
            token_account: chain_sol::bytes_to_address(&token_account),
            signature,
        })
    }

    /// Move `amount` whole tokens of `mint` from the wallet to `recipient`.
    /// The program scales `amount` by the mint's decimals.
    pub async fn transfer_tokens(
        &self,
        mint: &[u8; 32],
        recipient: &[u8; 32],
        amount: u64,
    ) -> ClientResult<TransferredTokens> {
        let sender = self.wallet_pubkey();
        let sender_account = derive_associated_token_address(&sender, mint)?;
        let recipient_account = derive_associated_token_address(recipient, mint)?;
        tracing::info!(
            mint = %chain_sol::bytes_to_address(mint),
            recipient = %chain_sol::bytes_to_address(recipient),
            amount,
            "transferring tokens"
        );

        let instruction = self
            .program
            .transfer_tokens(&sender, recipient, mint, amount)?;
        let signature = self.submit(instruction, &[]).await?;

        Ok(TransferredTokens {
            sender_token_account: chain_sol::bytes_to_address(&sender_account),
            recipient_token_account: chain_sol::bytes_to_address(&recipient_account),
            signature,
        })
    }

    /// Balance of `owner`'s associated account for `mint`. A missing
    /// account or failed query reads as zero.
    pub async fn get_token_balance(&self, mint: &[u8; 32], owner: &[u8; 32]) -> TokenBalance {
        let account = match derive_associated_token_address(owner, mint) {
            Ok(account) => account,
            Err(e) => {
                tracing::warn!(error = %e, "token account not found or error getting balance");
                return TokenBalance::default();
            }
        };

        match self.rpc.get_token_account_balance(&account).await {
            Ok(balance) => balance,
            Err(e) => {
                tracing::warn!(
                    account = %chain_sol::bytes_to_address(&account),
                    error = %e,
                    "token account not found or error getting balance"
                );
                TokenBalance::default()
            }
        }
    }

    /// SOL balance of `address`, or of the wallet when `None`.
    pub async fn get_sol_balance(&self, address: Option<&[u8; 32]>) -> ClientResult<f64> {
        let wallet = self.wallet_pubkey();
        let lamports = self.rpc.get_balance(address.unwrap_or(&wallet)).await?;
        Ok(lamports_to_sol(lamports))
    }
}
