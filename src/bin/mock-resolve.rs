//! Show which mock file would answer a request, without starting a server.
//!
//! Exit codes: `0` served, `1` no match, `2` lookup error, `3` invalid
//! JSON, `4` unreadable file.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use clap::Parser;

use json_mock::resolver::{matcher, parse_query, walker, QueryParams};
use json_mock::{MockError, Resolver};

#[derive(Parser)]
#[command(name = "mock-resolve")]
#[command(about = "Resolve a request against a mock tree and print the result", long_about = None)]
struct Cli {
    /// Mock root directory.
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// List every candidate for the leaf segment with its score.
    #[arg(short, long)]
    explain: bool,

    /// Request path with optional query, e.g. `/users/42?view=full`.
    url: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (path, query) = match cli.url.split_once('?') {
        Some((path, raw)) => (path, parse_query(raw)),
        None => (cli.url.as_str(), QueryParams::new()),
    };

    if cli.explain {
        explain(&cli.root, path, &query).await;
    }

    let resolver = Resolver::new(&cli.root);
    let code = match resolver.load(path, &query).await {
        Ok(mock) => {
            println!("{}", mock.path.display());
            println!("{}", serde_json::to_string_pretty(&mock.body)?);
            return Ok(ExitCode::SUCCESS);
        }
        Err(e @ MockError::NoMatch) => {
            eprintln!("no match: {}", e);
            1
        }
        Err(e @ MockError::Lookup(_)) => {
            eprintln!("lookup error: {}", e);
            2
        }
        Err(e @ MockError::Parse { .. }) => {
            eprintln!("invalid JSON: {}", e);
            3
        }
        Err(e @ MockError::Read { .. }) => {
            eprintln!("read error: {}", e);
            4
        }
    };
    Ok(ExitCode::from(code))
}

async fn explain(root: &Path, path: &str, query: &QueryParams) {
    let terminal = match walker::walk(root, path).await {
        Ok(terminal) => terminal,
        Err(e) => {
            eprintln!("no candidates: {}", e);
            return;
        }
    };
    let candidates = match matcher::list_candidates(&terminal.dir, &terminal.leaf).await {
        Ok(candidates) => candidates,
        Err(e) => {
            eprintln!("cannot list {}: {}", terminal.dir.display(), e);
            return;
        }
    };

    for (candidate, points) in matcher::scored(&candidates, &terminal.leaf, query) {
        match points {
            Some(points) => eprintln!("{:>6.1}  {}", points, candidate.file_name),
            None => eprintln!("{:>6}  {}", "--", candidate.file_name),
        }
    }
}
