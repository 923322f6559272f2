use std::fs::File;
use std::io::{Read, stdin};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use gradbook::{
    ApiClient, ApiRequest, ClientConfig, Envelope, FileStore, HttpTransport, KeyValueStore,
    Options, PageRequest,
};
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(
    name = "gradbook-cli",
    about = "Normalize and inspect GradBook API payloads",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rename `_id` keys to `id` throughout a JSON document
    Normalize(NormalizeArgs),
    /// Classify a response body and print it as a page
    Envelope(EnvelopeArgs),
    /// Authenticated GET against the configured backend
    Get(GetArgs),
}

#[derive(Args, Debug)]
struct NormalizeArgs {
    /// Pretty-print JSON on output
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Key to rename
    #[arg(long, default_value = gradbook::options::RESERVED_KEY)]
    reserved_key: String,

    /// Key to rename it to
    #[arg(long, default_value = gradbook::options::CANONICAL_KEY)]
    canonical_key: String,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct EnvelopeArgs {
    /// Page the listing was requested with
    #[arg(long)]
    page: Option<u64>,

    /// Page size the listing was requested with
    #[arg(long)]
    limit: Option<u64>,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GetArgs {
    /// Path under the API root, e.g. /admin/users
    path: String,

    /// Query parameter as key=value (repeatable)
    #[arg(long = "query", short = 'q')]
    query: Vec<String>,

    /// Directory holding the persisted session
    #[arg(long, default_value = ".gradbook")]
    store: PathBuf,

    /// Pretty-print JSON on output
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn read_input(input: &Option<PathBuf>) -> Result<String> {
    let mut buf = String::new();
    match input {
        Some(path) => {
            let mut f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            f.read_to_string(&mut buf)?;
        }
        None => {
            stdin().read_to_string(&mut buf)?;
        }
    }
    Ok(buf)
}

fn print_json(value: &Value, pretty: bool) -> Result<()> {
    if pretty {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", serde_json::to_string(value)?);
    }
    Ok(())
}

fn parse_query(pairs: &[String]) -> Result<Vec<(String, String)>> {
    pairs
        .iter()
        .map(|p| match p.split_once('=') {
            Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
            _ => bail!("invalid query parameter {p:?}, expected key=value"),
        })
        .collect()
}

fn run_normalize(args: NormalizeArgs) -> Result<()> {
    let buf = read_input(&args.input)?;
    let options = Options::new(args.reserved_key, args.canonical_key);
    let value = gradbook::normalize_str(&buf, &options)?;
    print_json(&value, args.pretty)
}

fn run_envelope(args: EnvelopeArgs) -> Result<()> {
    let buf = read_input(&args.input)?;
    let body = gradbook::normalize(&gradbook::parse_body(&buf)?);
    let envelope = Envelope::from_value(body);
    let kind = envelope.kind();
    let page = envelope.into_page::<Value>(&PageRequest::new(args.page, args.limit))?;
    let out = serde_json::json!({"kind": kind.as_str(), "page": page});
    print_json(&out, true)
}

async fn run_get(args: GetArgs) -> Result<()> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(base_url = %config.base_url, "using backend");
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&args.store));
    let client = ApiClient::new(HttpTransport::new(config)?, store);
    let request = ApiRequest::get(args.path).with_query(parse_query(&args.query)?);
    let body = client.execute(request).await?;
    print_json(&body, args.pretty)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Normalize(args) => run_normalize(args),
        Command::Envelope(args) => run_envelope(args),
        Command::Get(args) => run_get(args).await,
    }
}
