use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Solana cluster the CLI talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    #[default]
    Devnet,
    Testnet,
    MainnetBeta,
    Localnet,
}

impl Cluster {
    /// Public RPC endpoint used when no URL is configured.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Cluster::Localnet => "http://127.0.0.1:8899",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::MainnetBeta => "mainnet-beta",
            Cluster::Localnet => "localnet",
        }
    }

    /// Block explorer link for a transaction on this cluster.
    ///
    /// Localnet links point the explorer at `rpc_url` as a custom cluster.
    pub fn explorer_tx_url(&self, signature: &str, rpc_url: &str) -> String {
        let base = format!("https://explorer.solana.com/tx/{signature}");
        match self {
            Cluster::MainnetBeta => base,
            Cluster::Devnet | Cluster::Testnet => format!("{base}?cluster={}", self.name()),
            Cluster::Localnet => {
                let encoded: String = url::form_urlencoded::byte_serialize(rpc_url.as_bytes()).collect();
                format!("{base}?cluster=custom&customUrl={encoded}")
            }
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cluster {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            "mainnet-beta" | "mainnet" => Ok(Cluster::MainnetBeta),
            "localnet" | "localhost" => Ok(Cluster::Localnet),
            other => Err(format!(
                "unknown cluster '{other}' (expected devnet, testnet, mainnet-beta or localnet)"
            )),
        }
    }
}

/// Confirmation level, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

/// A token balance in base units plus the mint's decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenBalance {
    pub amount: u64,
    pub decimals: u8,
}

/// Exact decimal rendering, trailing zeros trimmed: 1_500_000_000 @ 9 → `1.5`.
impl fmt::Display for TokenBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decimals = self.decimals as usize;
        let digits = format!("{:0>width$}", self.amount, width = decimals + 1);
        let (whole, frac) = digits.split_at(digits.len() - decimals);
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            f.write_str(whole)
        } else {
            write!(f, "{whole}.{frac}")
        }
    }
}

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Result of `create_token`.
#[derive(Debug, Clone)]
pub struct CreatedToken {
    pub mint: String,
    pub signature: String,
}

/// Result of `mint_token`.
#[derive(Debug, Clone)]
pub struct MintedTokens {
    pub token_account: String,
    pub signature: String,
}

/// Result of `transfer_tokens`.
#[derive(Debug, Clone)]
pub struct TransferredTokens {
    pub sender_token_account: String,
    pub recipient_token_account: String,
    pub signature: String,
}

/// Parse a Base58 address argument, naming the argument on failure.
pub fn parse_pubkey(label: &str, value: &str) -> ClientResult<[u8; 32]> {
    chain_sol::address_to_bytes(value)
        .map_err(|e| ClientError::InvalidAddress(format!("{label}: {e}")))
}

/// Parse a token amount in whole tokens.
///
/// The token program scales the amount by `10^decimals` on chain, so `5`
/// mints or moves five tokens regardless of the mint's decimals.
pub fn parse_amount(value: &str) -> ClientResult<u64> {
    let amount: u64 = value
        .trim()
        .parse()
        .map_err(|e| ClientError::InvalidArgument(format!("amount '{value}': {e}")))?;
    if amount == 0 {
        return Err(ClientError::InvalidArgument("amount must be > 0".into()));
    }
    Ok(amount)
}
