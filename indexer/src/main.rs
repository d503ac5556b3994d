use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use index_core::{validate_collection, Document, IndexView, InvertedIndex, Query};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and query inverted indices over JSON book collections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build indices from JSON/JSONL files or a directory and print them
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Index name for a single input file (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
    },
    /// Build indices, then print the positions of every query token
    Search {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Index name for a single input file (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
        /// Search terms; repeat the flag to pass several
        #[arg(long, required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Check that every input file holds a valid book collection
    Validate {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, name } => {
            let index = build_indices(&input, name.as_deref())?;
            let mut out = IndexView::new();
            for n in index.names() {
                out.extend(index.get_index(n));
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(())
        }
        Commands::Search { input, name, query } => {
            let index = build_indices(&input, name.as_deref())?;
            let query = Query::from(query);
            let mut out = IndexView::new();
            for n in index.names() {
                out.extend(index.search_index(n, query.clone()));
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(())
        }
        Commands::Validate { input } => validate_files(&input),
    }
}

/// Load every input file and build one index per file.
fn build_indices(input: &str, name: Option<&str>) -> Result<InvertedIndex> {
    let files = discover_files(Path::new(input))?;
    if name.is_some() && files.len() > 1 {
        bail!("--name can only be used with a single input file, found {}", files.len());
    }

    let mut index = InvertedIndex::new();
    for file in &files {
        let key = match name {
            Some(n) => n.to_owned(),
            None => file_key(file),
        };
        let docs = load_documents(file)?;
        let built = index
            .create_index(&key, docs.as_deref())
            .with_context(|| format!("indexing {}", file.display()))?;
        if built {
            tracing::info!(file = %file.display(), name = %key, "indexed file");
        } else {
            tracing::info!(file = %file.display(), "file holds null, skipped");
        }
    }
    tracing::info!(num_indices = index.len(), "index build complete");
    Ok(index)
}

fn validate_files(input: &str) -> Result<()> {
    let mut invalid = 0usize;
    for file in discover_files(Path::new(input))? {
        let docs = load_documents(&file)?.unwrap_or_default();
        match validate_collection(&docs) {
            Ok(_) => println!("{}: valid ({} books)", file.display(), docs.len()),
            Err(err) => {
                invalid += 1;
                println!("{}: {err}", file.display());
            }
        }
    }
    if invalid > 0 {
        bail!("{invalid} invalid file(s)");
    }
    Ok(())
}

/// Collect `.json` and `.jsonl` files under `input` in file-name order.
fn discover_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        bail!("input path {} does not exist", input.display());
    }
    Ok(WalkDir::new(input)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_collection_file(e.path()))
        .map(|e| e.into_path())
        .collect())
}

fn is_collection_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|s| s.to_str()), Some("json" | "jsonl"))
}

fn file_key(file: &Path) -> String {
    file.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string())
}

/// Read a book collection. `Ok(None)` means the file holds JSON `null`.
fn load_documents(file: &Path) -> Result<Option<Vec<Document>>> {
    if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        load_jsonl(file).map(Some)
    } else {
        load_json(file)
    }
}

fn load_jsonl(file: &Path) -> Result<Vec<Document>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let mut docs = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: Document = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: malformed book", file.display(), lineno + 1))?;
        docs.push(doc);
    }
    Ok(docs)
}

fn load_json(file: &Path) -> Result<Option<Vec<Document>>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("parsing {}", file.display()))?;
    let docs = match json {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Document>, _>>()?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        other => bail!("{}: expected an array of books, found {other}", file.display()),
    };
    Ok(Some(docs))
}
