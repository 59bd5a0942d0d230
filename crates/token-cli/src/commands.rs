use chain_sol::bytes_to_address;
use keystore::Keypair;
use token_client::{parse_amount, parse_pubkey, ClientResult, Config, TokenInteractor};

use crate::cli::Action;

const DEMO_NAME: &str = "Demo Token";
const DEMO_SYMBOL: &str = "DEMO";
const DEMO_URI: &str = "https://example.com/demo-token.json";
const DEMO_MINT_AMOUNT: u64 = 1000;
const DEMO_TRANSFER_AMOUNT: u64 = 100;

pub async fn run(action: Action, config: Config) -> ClientResult<()> {
    let interactor = TokenInteractor::new(config)?;
    println!("Connected to {}", interactor.config().cluster);
    println!("Wallet: {}", interactor.wallet().pubkey_string());
    println!("Program ID: {}", interactor.config().program_id);

    match action {
        Action::Create { name, symbol, uri } => {
            create(&interactor, &name, &symbol, &uri).await?;
        }
        Action::Mint {
            mint,
            recipient,
            amount,
        } => {
            let mint = parse_pubkey("mint_address", &mint)?;
            let recipient = parse_pubkey("recipient", &recipient)?;
            let amount = parse_amount(&amount)?;
            mint_to(&interactor, &mint, &recipient, amount).await?;
        }
        Action::Transfer {
            mint,
            recipient,
            amount,
        } => {
            let mint = parse_pubkey("mint_address", &mint)?;
            let recipient = parse_pubkey("recipient", &recipient)?;
            let amount = parse_amount(&amount)?;
            transfer(&interactor, &mint, &recipient, amount).await?;
        }
        Action::Balance { mint, owner } => {
            let mint = parse_pubkey("mint_address", &mint)?;
            let owner = match owner {
                Some(owner) => parse_pubkey("owner", &owner)?,
                None => interactor.wallet_pubkey(),
            };
            let balance = interactor.get_token_balance(&mint, &owner).await;
            println!("Token balance: {balance}");
        }
        Action::SolBalance { address } => {
            let address = address
                .map(|a| parse_pubkey("address", &a))
                .transpose()?;
            let balance = interactor.get_sol_balance(address.as_ref()).await?;
            println!("SOL balance: {balance} SOL");
        }
        Action::Demo => demo(&interactor).await?,
    }
    Ok(())
}

async fn create(
    interactor: &TokenInteractor,
    name: &str,
    symbol: &str,
    uri: &str,
) -> ClientResult<[u8; 32]> {
    println!();
    println!("Creating token: {name} ({symbol})");
    let mint = Keypair::generate();
    println!("Mint address: {}", mint.pubkey_string());
    let created = interactor
        .create_token_with_mint(&mint, name, symbol, uri)
        .await?;
    println!("Token created successfully!");
    println!("Transaction: {}", interactor.explorer_url(&created.signature));
    Ok(mint.pubkey())
}

async fn mint_to(
    interactor: &TokenInteractor,
    mint: &[u8; 32],
    recipient: &[u8; 32],
    amount: u64,
) -> ClientResult<()> {
    println!();
    println!("Minting {amount} tokens to {}", bytes_to_address(recipient));
    let minted = interactor.mint_token(mint, recipient, amount).await?;
    println!("Token account: {}", minted.token_account);
    println!("Tokens minted successfully!");
    println!("Transaction: {}", interactor.explorer_url(&minted.signature));
    Ok(())
}

async fn transfer(
    interactor: &TokenInteractor,
    mint: &[u8; 32],
    recipient: &[u8; 32],
    amount: u64,
) -> ClientResult<()> {
    println!();
    println!("Transferring {amount} tokens to {}", bytes_to_address(recipient));
    let transferred = interactor.transfer_tokens(mint, recipient, amount).await?;
    println!("From: {}", transferred.sender_token_account);
    println!("To: {}", transferred.recipient_token_account);
    println!("Tokens transferred successfully!");
    println!("Transaction: {}", interactor.explorer_url(&transferred.signature));
    Ok(())
}

/// Create a token, mint to self, transfer part of it to a fresh address,
/// then show both balances.
async fn demo(interactor: &TokenInteractor) -> ClientResult<()> {
    let delay = interactor.config().demo_step_delay();
    let owner = interactor.wallet_pubkey();
    println!("Running complete demo...");

    let mint = create(interactor, DEMO_NAME, DEMO_SYMBOL, DEMO_URI).await?;
    tokio::time::sleep(delay).await;

    mint_to(interactor, &mint, &owner, DEMO_MINT_AMOUNT).await?;
    tokio::time::sleep(delay).await;

    let recipient = Keypair::generate();
    println!();
    println!("Generated recipient: {}", recipient.pubkey_string());
    transfer(interactor, &mint, &recipient.pubkey(), DEMO_TRANSFER_AMOUNT).await?;

    println!();
    println!("Final balances:");
    let sender_balance = interactor.get_token_balance(&mint, &owner).await;
    let recipient_balance = interactor.get_token_balance(&mint, &recipient.pubkey()).await;
    println!("Sender: {sender_balance} tokens");
    println!("Recipient: {recipient_balance} tokens");

    println!();
    println!("Demo completed successfully!");
    Ok(())
}
