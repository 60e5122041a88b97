use std::{fs, io::{self, Read, Write}, path::{Path, PathBuf}, time::Instant};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tfidf_docstore::{Config, FsStore, Hits, Index};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Query or extend a directory of text documents with TF-IDF cosine ranking.
/// Logs go to stderr, results to stdout.
#[derive(Parser, Debug)]
#[command(name = "tfidf-docstore", version)]
struct Cli {
    /// Document directory (default: $DOCS_DIR or data/docs)
    #[arg(long)]
    docs: Option<PathBuf>,

    /// Number of hits (default: $DOCS_TOP_K or 3)
    #[arg(short = 'k', long = "top-k")]
    top_k: Option<usize>,

    /// Print hits as JSON instead of `<score>\t<id>` lines
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one query
    Query {
        text: String,
    },
    /// Store a document read from FILE (`-` for stdin) under ID, then reload
    Add {
        id: String,
        file: PathBuf,
    },
    /// Read queries from stdin until an empty line, `exit` or `quit`
    Repl,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(dir) = cli.docs.clone() {
        config.docs_dir = dir;
    }
    if let Some(k) = cli.top_k {
        config.default_top_k = k;
    }
    config.validate()?;

    let load_start = Instant::now();
    let store = FsStore::open(&config.docs_dir)?;
    let mut index: Index<FsStore> = Index::open(store)?.with_default_top_k(config.default_top_k)?;
    info!(
        dir = %config.docs_dir.display(),
        elapsed_ms = load_start.elapsed().as_secs_f64() * 1000.0,
        "index ready"
    );

    match cli.command {
        Command::Query { text } => {
            let text = text.trim();
            if text.is_empty() {
                bail!("empty query");
            }
            print_hits(&index.query(text, None), cli.json)?;
        }
        Command::Add { id, file } => {
            let text = read_input(&file)?;
            index.add_document(&id, &text)?;
            println!("stored {id} ({} documents, {} indexed)", index.doc_num(), index.indexed_num());
        }
        Command::Repl => run_interactive(&index, cli.json)?,
    }
    Ok(())
}

fn read_input(file: &Path) -> anyhow::Result<String> {
    if file.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
    }
}

fn print_hits(hits: &Hits, json: bool) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer(&mut stdout, hits)?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{hits}")?;
    }
    Ok(())
}

fn run_interactive(index: &Index<FsStore>, json: bool) -> anyhow::Result<()> {
    let stdin = io::stdin();
    loop {
        print!("Query> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }
        let start = Instant::now();
        let hits = index.query(trimmed, None);
        info!(hits = hits.len(), elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "query");
        if hits.is_empty() {
            println!("(no hits)");
            continue;
        }
        print_hits(&hits, json)?;
    }
    Ok(())
}
