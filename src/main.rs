mod fetch;
mod model;
mod parser;
mod render;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::{info, warn};

const DEFAULT_OUT: &str = "modules/nakama.lua";
const DEFAULT_START_MARKER: &str = "account_delete_id";

#[derive(Parser)]
#[command(
    name = "nakama_stubgen",
    about = "Generate Lua annotation stubs from the Nakama runtime function reference"
)]
struct Cli {
    /// Reference page URL to fetch
    #[arg(long, default_value = fetch::REFERENCE_URL)]
    url: String,

    /// Output path for the generated stub file
    #[arg(short, long, default_value = DEFAULT_OUT)]
    out: PathBuf,

    /// Parse a saved copy of the page instead of fetching
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// First function heading on the page; earlier headings are prose
    #[arg(long, default_value = DEFAULT_START_MARKER)]
    start_marker: String,

    /// Print extracted functions as JSON instead of writing the stub file
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let html = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => fetch::fetch_page(&cli.url)?,
    };

    let functions = parser::parse_reference(&html, &cli.start_marker);
    if functions.is_empty() {
        warn!("No function sections found; check the page layout or --start-marker");
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&functions)?);
        return Ok(());
    }

    render::write_stubs(&cli.out, &functions)?;
    for f in &functions {
        info!("Added function: {}", f.name);
    }
    println!(
        "Generated {} with {} functions.",
        cli.out.display(),
        functions.len()
    );
    Ok(())
}
