use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use token_client::{Cluster, Config};

const EXAMPLES: &str = "\
Examples:
  token-cli create \"My Token\" \"MTK\" \"https://example.com/metadata.json\"
  token-cli mint 7XH3G...abc 9WZ4f...xyz 100
  token-cli transfer 7XH3G...abc 9WZ4f...xyz 50
  token-cli balance 7XH3G...abc
  token-cli demo";

#[derive(Debug, Parser)]
#[command(name = "token-cli", version)]
#[command(about = "Create, mint and transfer tokens through the on-chain token program")]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// TOML config file (also `TOKEN_CLI_CONFIG`)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// RPC endpoint, overriding the cluster default
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    pub url: Option<String>,

    /// devnet, testnet, mainnet-beta or localnet
    #[arg(long, global = true)]
    pub cluster: Option<Cluster>,

    /// Wallet keypair file
    #[arg(short = 'k', long, global = true, value_name = "PATH")]
    pub keypair: Option<PathBuf>,

    /// Token program address
    #[arg(long, global = true, value_name = "ADDRESS")]
    pub program_id: Option<String>,

    /// Log level or filter directives, e.g. `debug` or `token_client=trace`
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

impl GlobalOpts {
    /// Flags win over the file and environment.
    pub fn apply(&self, config: &mut Config) {
        if let Some(cluster) = self.cluster {
            config.cluster = cluster;
        }
        if let Some(url) = &self.url {
            config.rpc_url = Some(url.clone());
        }
        if let Some(path) = &self.keypair {
            config.keypair_path = Some(path.clone());
        }
        if let Some(program_id) = &self.program_id {
            config.program_id = program_id.clone();
        }
    }
}

// Positionals are optional so a short argument list gets the
// "Missing arguments" message rather than a clap usage error. Surplus
// positionals land in `ignored`.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new token
    Create {
        name: Option<String>,
        symbol: Option<String>,
        uri: Option<String>,
        #[arg(hide = true)]
        ignored: Vec<String>,
    },
    /// Mint tokens to recipient
    Mint {
        #[arg(value_name = "MINT_ADDRESS")]
        mint: Option<String>,
        recipient: Option<String>,
        amount: Option<String>,
        #[arg(hide = true)]
        ignored: Vec<String>,
    },
    /// Transfer tokens
    Transfer {
        #[arg(value_name = "MINT_ADDRESS")]
        mint: Option<String>,
        recipient: Option<String>,
        amount: Option<String>,
        #[arg(hide = true)]
        ignored: Vec<String>,
    },
    /// Check token balance
    Balance {
        #[arg(value_name = "MINT_ADDRESS")]
        mint: Option<String>,
        owner: Option<String>,
        #[arg(hide = true)]
        ignored: Vec<String>,
    },
    /// Check SOL balance
    SolBalance {
        address: Option<String>,
        #[arg(hide = true)]
        ignored: Vec<String>,
    },
    /// Run a complete demo
    Demo {
        #[arg(hide = true)]
        ignored: Vec<String>,
    },
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

/// A command with all of its required arguments present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Create {
        name: String,
        symbol: String,
        uri: String,
    },
    Mint {
        mint: String,
        recipient: String,
        amount: String,
    },
    Transfer {
        mint: String,
        recipient: String,
        amount: String,
    },
    Balance {
        mint: String,
        owner: Option<String>,
    },
    SolBalance {
        address: Option<String>,
    },
    Demo,
}

/// Why a parsed command does not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotRunnable {
    /// Required arguments are absent; carries the usage line.
    MissingArguments(&'static str),
    UnknownCommand(String),
}

impl fmt::Display for NotRunnable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotRunnable::MissingArguments(usage) => write!(f, "Missing arguments: {usage}"),
            NotRunnable::UnknownCommand(name) => write!(f, "Unknown command: {name}"),
        }
    }
}

impl Command {
    pub fn usage(&self) -> Option<&'static str> {
        match self {
            Command::Create { .. } => Some("create <name> <symbol> <uri>"),
            Command::Mint { .. } => Some("mint <mint_address> <recipient> <amount>"),
            Command::Transfer { .. } => Some("transfer <mint_address> <recipient> <amount>"),
            Command::Balance { .. } => Some("balance <mint_address> [owner]"),
            Command::SolBalance { .. } => Some("sol-balance [address]"),
            Command::Demo { .. } => Some("demo"),
            Command::Unknown(_) => None,
        }
    }

    pub fn into_action(self) -> Result<Action, NotRunnable> {
        let missing = NotRunnable::MissingArguments(self.usage().unwrap_or_default());
        match self {
            Command::Create {
                name,
                symbol,
                uri,
                ..
            } => match (name, symbol, uri) {
                (Some(name), Some(symbol), Some(uri)) => Ok(Action::Create { name, symbol, uri }),
                _ => Err(missing),
            },
            Command::Mint {
                mint,
                recipient,
                amount,
                ..
            } => match (mint, recipient, amount) {
                (Some(mint), Some(recipient), Some(amount)) => Ok(Action::Mint {
                    mint,
                    recipient,
                    amount,
                }),
                _ => Err(missing),
            },
            Command::Transfer {
                mint,
                recipient,
                amount,
                ..
            } => match (mint, recipient, amount) {
                (Some(mint), Some(recipient), Some(amount)) => Ok(Action::Transfer {
                    mint,
                    recipient,
                    amount,
                }),
                _ => Err(missing),
            },
            Command::Balance { mint, owner, .. } => match mint {
                Some(mint) => Ok(Action::Balance { mint, owner }),
                None => Err(missing),
            },
            Command::SolBalance { address, .. } => Ok(Action::SolBalance { address }),
            Command::Demo { .. } => Ok(Action::Demo),
            Command::Unknown(args) => Err(NotRunnable::UnknownCommand(
                args.into_iter().next().unwrap_or_default(),
            )),
        }
    }
}
