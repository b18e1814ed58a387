//! ecdh-agent CLI, the `ecdh` command.
//!
//! Runs one side of an ECDH exchange: generates an ephemeral agent,
//! publishes its PEM public key, reads the peer's PEM public key, and
//! prints the shared secret.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use ecdh_agent::{BufferPool, Curve, EcdhAgent};

// ── CLI structure ─────────────────────────────────────────────────────────────

/// ecdh CLI: elliptic-curve Diffie-Hellman key agreement over NIST curves.
#[derive(Parser, Debug)]
#[command(
    name = "ecdh",
    about = "ecdh-agent CLI",
    version,
    long_about = "ecdh: ecdh-agent CLI\n\nGenerate an ephemeral key pair, exchange PEM public keys,\nand derive a SHA3-512 shared secret."
)]
struct Cli {
    /// Emit machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one side of a key exchange
    Exchange {
        /// Curve identifier (P224, P256, P384, P521)
        #[arg(long, default_value = "P256")]
        curve: String,

        /// File to write our public key to (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,

        /// File holding the peer's PEM public key (default: stdin)
        #[arg(long)]
        peer: Option<PathBuf>,
    },

    /// List supported curve identifiers
    Curves,
}

#[derive(Serialize)]
struct ExchangeOutput {
    curve: Curve,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key: Option<String>,
    shared_secret: String,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Exchange { curve, out, peer } => cmd_exchange(
            &curve,
            out.as_deref(),
            peer.as_deref(),
            cli.json,
            cli.verbose,
        ),
        Commands::Curves => cmd_curves(cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// ── Command implementations ───────────────────────────────────────────────────

/// `ecdh exchange [--curve C] [--out FILE] [--peer FILE]`
fn cmd_exchange(
    curve: &str,
    out: Option<&Path>,
    peer: Option<&Path>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    // JSON output is one document, so our key would only appear after the
    // peer's key had been read from stdin.
    if json && out.is_none() && peer.is_none() {
        bail!("--json with the peer key on stdin needs --out for our public key");
    }

    let agent = EcdhAgent::new(curve)?;
    let public_key = agent.public_key_pem()?;

    let printed_key = match out {
        Some(path) => {
            std::fs::write(path, &public_key)
                .with_context(|| format!("writing public key to {}", path.display()))?;
            if verbose {
                eprintln!("Wrote {} public key to {}", agent.curve(), path.display());
            }
            None
        }
        None => Some(public_key),
    };

    if let (Some(pem), false) = (&printed_key, json) {
        print!("{pem}");
    }

    let peer_pem = read_peer(peer)?;
    log::debug!("read {} bytes of peer key text", peer_pem.len());

    let pool = BufferPool::new();
    let shared_secret = agent
        .derive_shared_secret(&peer_pem, &pool)
        .context("deriving shared secret")?;

    if json {
        let output = ExchangeOutput {
            curve: agent.curve(),
            public_key: printed_key,
            shared_secret,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{shared_secret}");
    }

    Ok(())
}

/// `ecdh curves`
fn cmd_curves(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&Curve::ALL)?);
    } else {
        for curve in Curve::ALL {
            println!("{curve}");
        }
    }
    Ok(())
}

fn read_peer(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading peer key from {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading peer key from stdin")?;
            Ok(text)
        }
    }
}
