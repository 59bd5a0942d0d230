//! Client for the token program: configuration, JSON-RPC transport, and
//! the create/mint/transfer/balance operations the CLI exposes.

pub mod config;
pub mod error;
pub mod interactor;
pub mod rpc;
pub mod types;

pub use config::Config;
pub use error::{ClientError, ClientResult, ConfigError};
pub use interactor::TokenInteractor;
pub use rpc::{RpcClient, SignatureStatus};
pub use types::{
    lamports_to_sol, parse_amount, parse_pubkey, Cluster, Commitment, CreatedToken, MintedTokens,
    TokenBalance, TransferredTokens, LAMPORTS_PER_SOL,
};
