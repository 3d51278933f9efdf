//! Signed store command-line client.
//!
//! Every check runs locally against the server's exported public key.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use signed_store_client::{
    ClientError, ClientSession, Integrity, PublicKeyHandle, StoreClient, DEFAULT_URL,
};

/// Client for a signed store server.
#[derive(Parser, Debug)]
#[command(name = "signed-store")]
#[command(about = "Read, update and independently verify a signed store")]
#[command(version)]
struct Args {
    /// Base URL of the server
    #[arg(long, env = "SIGNED_STORE_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Log level for diagnostics on stderr
    #[arg(long, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current value and check its signature
    Get,
    /// Print the server's public key
    PublicKey,
    /// Request a signature for VALUE, commit it and re-check
    Update {
        /// New value
        value: String,
    },
    /// Check a value and base64 signature against the server's public key
    Verify {
        /// Value that was signed
        value: String,
        /// Base64 signature
        signature: String,
    },
    /// Corrupt the held signature, show detection, then recover
    TamperDemo,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let client = StoreClient::new(&args.url);

    match run(client, args.command).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run one command; `Ok(false)` means a check failed.
async fn run(client: StoreClient, command: Command) -> Result<bool, ClientError> {
    match command {
        Command::Get => {
            let session = ClientSession::connect(client).await?;
            println!("data:      {}", session.data());
            println!("signature: {}", session.signature());

            let integrity = session.verify();
            println!("{}", integrity);
            Ok(integrity == Integrity::Verified)
        }
        Command::PublicKey => {
            print!("{}", client.fetch_public_key().await?);
            Ok(true)
        }
        Command::Update { value } => {
            let mut session = ClientSession::connect(client).await?;
            session.set_data(value);

            match session.update().await {
                Ok(()) => {
                    println!("data: {}", session.data());
                    let integrity = session.verify();
                    println!("{}", integrity);
                    Ok(integrity == Integrity::Verified)
                }
                Err(e) if e.is_invalid_signature() => {
                    println!("Invalid signature");
                    Ok(false)
                }
                Err(e) => Err(e),
            }
        }
        Command::Verify { value, signature } => {
            let public_key = PublicKeyHandle::import(&client.fetch_public_key().await?)?;

            let valid = public_key.verify_locally(&value, &signature);
            println!("{}", if valid { Integrity::Verified } else { Integrity::Tampered });
            Ok(valid)
        }
        Command::TamperDemo => {
            let mut session = ClientSession::connect(client).await?;
            println!("fetched:   {}", session.verify());

            session.tamper();
            let tampered = session.verify();
            println!("tampered:  {}", tampered);

            session.recover().await?;
            let recovered = session.verify();
            println!("recovered: {}", recovered);

            Ok(tampered == Integrity::Tampered && recovered == Integrity::Verified)
        }
    }
}
