//! Keywire CLI
//!
//! Inspects OpenSSH private key files and checks ECDSA signatures.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keywire::{decode_pem_private_key, verify_signature, PrivateKey, SignatureFormat};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Keywire key and signature tool
#[derive(Parser)]
#[command(name = "keywire")]
#[command(version)]
#[command(about = "OpenSSH private key inspection and ECDSA verification", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// The logging level (trace|debug|info|warn|error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an OpenSSH private key file and print what it holds
    Inspect {
        /// Key file to decode; reads stdin when omitted
        file: Option<PathBuf>,

        /// Passphrase for encrypted keys
        #[arg(short, long)]
        passphrase: Option<String>,
    },

    /// Verify an ECDSA signature over a precomputed digest
    Verify {
        /// OpenSSH private key file holding the ECDSA key
        #[arg(long)]
        key: PathBuf,

        /// Passphrase for encrypted keys
        #[arg(short, long)]
        passphrase: Option<String>,

        /// Signature bytes, hex encoded
        #[arg(long)]
        signature: String,

        /// Message digest, hex encoded
        #[arg(long)]
        digest: String,

        /// Signature encoding (der|raw|ethereum|ssh)
        #[arg(long, default_value = "der")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Commands::Inspect { file, passphrase } => cmd_inspect(file, passphrase.as_deref()),
        Commands::Verify {
            key,
            passphrase,
            signature,
            digest,
            format,
        } => cmd_verify(&key, passphrase.as_deref(), &signature, &digest, &format),
    };

    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn read_key_text(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

fn cmd_inspect(file: Option<PathBuf>, passphrase: Option<&str>) -> Result<()> {
    let text = read_key_text(file.as_ref())?;
    let decoded = decode_pem_private_key(&text, passphrase).context("decoding private key")?;

    info!(algorithm = %decoded.key.algorithm(), "key decoded");

    println!("Algorithm: {}", decoded.key.algorithm());
    if !decoded.comment.is_empty() {
        println!("Comment:   {}", decoded.comment);
    }

    match &decoded.key {
        PrivateKey::Ed25519(key) => {
            println!("Public:    {}", hex::encode(key.public_key().to_bytes()));
        }
        PrivateKey::Ecdsa(key) => {
            println!("Curve:     {}", key.curve());
            println!("Public:    {}", hex::encode(key.public_key().to_sec1_bytes()));
        }
        PrivateKey::Rsa(key) => {
            println!("Modulus:   {} bits", key.modulus_bits());
        }
    }

    Ok(())
}

fn cmd_verify(
    key_path: &PathBuf,
    passphrase: Option<&str>,
    signature_hex: &str,
    digest_hex: &str,
    format: &str,
) -> Result<()> {
    let format = match format.to_lowercase().as_str() {
        "der" => SignatureFormat::Der,
        "raw" => SignatureFormat::Raw,
        "ethereum" => SignatureFormat::Ethereum,
        "ssh" => SignatureFormat::Ssh,
        other => anyhow::bail!("unknown signature format: {}", other),
    };

    let text = read_key_text(Some(key_path))?;
    let decoded = decode_pem_private_key(&text, passphrase).context("decoding private key")?;
    let key = match &decoded.key {
        PrivateKey::Ecdsa(key) => key.public_key(),
        other => anyhow::bail!(
            "signature verification requires an ECDSA key, got {}",
            other.algorithm()
        ),
    };

    let signature = hex::decode(signature_hex).context("decoding signature hex")?;
    let digest = hex::decode(digest_hex).context("decoding digest hex")?;

    if verify_signature(format, &signature, &digest, &key)? {
        println!("Signature valid");
        Ok(())
    } else {
        println!("Signature INVALID");
        std::process::exit(2);
    }
}
