use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rsa_crypto::util::{read_key_file, read_text_arg};
use rsa_crypto::{CryptoEngine, CryptoError, EngineConfig, SignatureHash};

/// RSA encrypt/decrypt/sign/verify with PEM keys (PKCS#1 v1.5)
#[derive(Parser, Debug)]
#[command(name = "rsa-crypto", version, about)]
struct Cli {
    /// Signature digest, overrides RSA_CRYPTO_SIGNATURE_HASH
    #[arg(long, global = true)]
    hash: Option<SignatureHash>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encrypt MESSAGE, print hex ciphertext
    Encrypt {
        message: String,
        #[arg(long)]
        key: PathBuf,
    },
    /// Encrypt MESSAGE, print base64 ciphertext
    Encrypt64 {
        message: String,
        #[arg(long)]
        key: PathBuf,
    },
    /// Decrypt hex CIPHERTEXT
    Decrypt {
        ciphertext: String,
        #[arg(long)]
        key: PathBuf,
    },
    /// Decrypt base64 CIPHERTEXT
    Decrypt64 {
        ciphertext: String,
        #[arg(long)]
        key: PathBuf,
    },
    /// Sign MESSAGE, print hex signature
    Sign {
        message: String,
        #[arg(long)]
        key: PathBuf,
    },
    /// Sign MESSAGE, print base64 signature
    Sign64 {
        message: String,
        #[arg(long)]
        key: PathBuf,
    },
    /// Verify hex SIGNATURE over MESSAGE, print true or false
    Verify {
        signature: String,
        message: String,
        #[arg(long)]
        key: PathBuf,
    },
    /// Verify base64 SIGNATURE over MESSAGE, print true or false
    Verify64 {
        signature: String,
        message: String,
        #[arg(long)]
        key: PathBuf,
    },
}

fn init_logging(log_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}

fn run(engine: CryptoEngine, command: Command) -> Result<std::result::Result<String, CryptoError>> {
    let key_text = |path: &PathBuf| {
        read_key_file(path).with_context(|| format!("failed to read key {}", path.display()))
    };
    let text = |arg: &str| read_text_arg(arg).context("failed to read input");

    let outcome = match command {
        Command::Encrypt { message, key } => engine.encrypt(&text(&message)?, &key_text(&key)?),
        Command::Encrypt64 { message, key } => engine.encrypt64(&text(&message)?, &key_text(&key)?),
        Command::Decrypt { ciphertext, key } => {
            engine.decrypt(&text(&ciphertext)?, &key_text(&key)?)
        }
        Command::Decrypt64 { ciphertext, key } => {
            engine.decrypt64(&text(&ciphertext)?, &key_text(&key)?)
        }
        Command::Sign { message, key } => engine.sign(&text(&message)?, &key_text(&key)?),
        Command::Sign64 { message, key } => engine.sign64(&text(&message)?, &key_text(&key)?),
        Command::Verify { signature, message, key } => engine
            .verify(&text(&signature)?, &text(&message)?, &key_text(&key)?)
            .map(|ok| ok.to_string()),
        Command::Verify64 { signature, message, key } => engine
            .verify64(&text(&signature)?, &text(&message)?, &key_text(&key)?)
            .map(|ok| ok.to_string()),
    };
    Ok(outcome)
}

fn main() {
    let cli = Cli::parse();

    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    };
    if let Err(e) = init_logging(&config.log_level) {
        eprintln!("Warning: {:#}", e);
    }

    let engine = CryptoEngine::new(cli.hash.unwrap_or(config.signature_hash));
    match run(engine, cli.command) {
        Ok(Ok(output)) => println!("{}", output),
        Ok(Err(e)) => {
            eprintln!("{}: {}", e.label(), e.message());
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}
