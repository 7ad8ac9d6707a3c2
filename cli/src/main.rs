//! TradeLens CLI — decode Polygon transaction receipts into trade events.
//!
//! # Commands
//! ```
//! tradelens decode-tx  --tx <hash> [--rpc <url>] [--json]
//! tradelens fills      --tx <hash> --maker <address> [--rpc <url>] [--json]
//! tradelens decode-log --topics <...> [--data <hex>] [--json]
//! tradelens signatures
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;

use tradelens_core::event::{DecodedEvent, OrderFill, RawLog};
use tradelens_core::registry::SignatureRegistry;
use tradelens_evm::LogDecoder;
use tradelens_rpc::{HttpReceiptClient, LookupError, TradeLookup, DEFAULT_RPC_URL};

#[derive(Parser)]
#[command(
    name = "tradelens",
    about = "Polygon trade event decoder — TradeLens CLI",
    long_about = "
TradeLens CLI: fetch Polygon transaction receipts and decode their logs into
typed trade events. Built on alloy-rs. The CTF exchange OrderFilled topic is
matched first by exact equality; ERC-20 and ERC-1155 signatures follow.

ENVIRONMENT VARIABLES:
  TRADELENS_RPC_URL    Polygon JSON-RPC endpoint (default: https://polygon-rpc.com)
",
    version
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a receipt and decode every matching log
    #[command(name = "decode-tx")]
    DecodeTx {
        /// Transaction hash (0x-prefixed, 32 bytes)
        #[arg(long)]
        tx: String,
        /// JSON-RPC endpoint (overrides env TRADELENS_RPC_URL)
        #[arg(long)]
        rpc: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch a receipt and keep only order fills by a maker address
    Fills {
        /// Transaction hash (0x-prefixed, 32 bytes)
        #[arg(long)]
        tx: String,
        /// Maker address to filter on (any casing)
        #[arg(long)]
        maker: String,
        /// JSON-RPC endpoint (overrides env TRADELENS_RPC_URL)
        #[arg(long)]
        rpc: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a single log from raw topics + data, no network
    #[command(name = "decode-log")]
    DecodeLog {
        /// topics[0] = event signature hash, topics[1..] = indexed params
        #[arg(long, num_args = 1..)]
        topics: Vec<String>,
        /// Non-indexed params (hex, 0x-prefixed)
        #[arg(long, default_value = "0x")]
        data: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the known event signatures and their topic hashes
    Signatures,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::DecodeTx { tx, rpc, json } => cmd_decode_tx(&tx, rpc, json).await,

        Commands::Fills { tx, maker, rpc, json } => cmd_fills(&tx, &maker, rpc, json).await,

        Commands::DecodeLog { topics, data, json } => cmd_decode_log(&topics, &data, json),

        Commands::Signatures => cmd_signatures(),
    }
}

/// Logs go to stderr so JSON output stays pipeable.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_rpc(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("TRADELENS_RPC_URL").ok())
        .unwrap_or_else(|| DEFAULT_RPC_URL.to_string())
}

// ─── Command implementations ─────────────────────────────────────────────────

async fn cmd_decode_tx(tx: &str, rpc: Option<String>, as_json: bool) -> Result<()> {
    let lookup = TradeLookup::with_builtin(HttpReceiptClient::new(resolve_rpc(rpc)));
    let (receipt, events) = match lookup.transaction_events(tx).await {
        Ok(decoded) => decoded,
        Err(LookupError::ReceiptNotFound(_)) => bail!("Transaction not found."),
        Err(err) => return Err(err).context("failed to retrieve trade information"),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    println!(
        "Receipt {} at block {} (status {})",
        receipt.transaction_hash,
        receipt.block_number_u64(),
        if receipt.succeeded() { "ok" } else { "failed" }
    );
    if events.is_empty() {
        println!("No matching events found in this transaction.");
        return Ok(());
    }
    println!("Events ({}):", events.len());
    for (i, event) in events.iter().enumerate() {
        println!();
        print_event(i + 1, event);
    }
    Ok(())
}

async fn cmd_fills(tx: &str, maker: &str, rpc: Option<String>, as_json: bool) -> Result<()> {
    let lookup = TradeLookup::with_builtin(HttpReceiptClient::new(resolve_rpc(rpc)));
    let fills = match lookup.fills_by_maker(tx, maker).await {
        Ok(fills) => fills,
        Err(LookupError::ReceiptNotFound(_)) => bail!("Transaction not found."),
        Err(err) => return Err(err).context("failed to retrieve trade information"),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&fills)?);
        return Ok(());
    }

    if fills.is_empty() {
        println!("No fills by {} in this transaction.", maker);
        return Ok(());
    }
    println!("Fills by {} ({}):", maker, fills.len());
    for (i, fill) in fills.iter().enumerate() {
        println!();
        println!("  [{}] OrderFilled", i + 1);
        print_fill_fields(fill);
    }
    Ok(())
}

fn cmd_decode_log(topics: &[String], data: &str, as_json: bool) -> Result<()> {
    let bytes =
        hex::decode(data.strip_prefix("0x").unwrap_or(data)).context("invalid data hex")?;
    let raw = RawLog {
        address: "0x0".into(),
        topics: topics.to_vec(),
        data: bytes,
    };

    let decoder = LogDecoder::new(Arc::new(SignatureRegistry::with_builtin()));
    match decoder.decode_log(&raw)? {
        Some(event) => {
            if as_json {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                print_event(1, &event);
            }
        }
        None => println!("Log matched no known signature."),
    }
    Ok(())
}

fn cmd_signatures() -> Result<()> {
    let registry = SignatureRegistry::with_builtin();
    println!("Known signatures ({}):", registry.len());
    for sig in registry.signatures() {
        println!("  {}  {}", sig.topic().as_hex(), sig.canonical());
    }
    Ok(())
}

// ─── Output rendering ────────────────────────────────────────────────────────

fn print_event(index: usize, event: &DecodedEvent) {
    println!("  [{index}] {}", event.kind());
    match event {
        DecodedEvent::OrderFilled(fill) => print_fill_fields(fill),
        DecodedEvent::Transfer(t) => {
            print_field("from", &t.from);
            print_field("to", &t.to);
            print_field("value", &t.value);
        }
        DecodedEvent::Approval(a) => {
            print_field("owner", &a.owner);
            print_field("spender", &a.spender);
            print_field("value", &a.value);
        }
        DecodedEvent::TransferSingle(t) => {
            print_field("operator", &t.operator);
            print_field("from", &t.from);
            print_field("to", &t.to);
            print_field("tokenId", &t.token_id);
            print_field("value", &t.value);
        }
        DecodedEvent::Other { fields, .. } => {
            for (name, value) in fields {
                print_field(name, &value.to_string());
            }
        }
    }
}

fn print_fill_fields(fill: &OrderFill) {
    print_field("orderHash", &fill.order_hash);
    print_field("maker", &fill.maker);
    print_field("taker", &fill.taker);
    print_field("makerAssetId", &fill.maker_asset_id);
    print_field("takerAssetId", &fill.taker_asset_id);
    print_field("makerAmountFilled", &fill.maker_amount_filled);
    print_field("takerAmountFilled", &fill.taker_amount_filled);
    print_field("fee", &fill.fee);
}

fn print_field(name: &str, value: &str) {
    println!("      {:18} {}", format!("{name}:"), value);
}
