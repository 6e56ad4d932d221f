use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use secsearch_core::history::SearchHistory;
use secsearch_core::persist::{load_articles, save_articles, StorePaths};
use secsearch_core::{RawArticle, SearchEngine};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "secsearch")]
#[command(about = "Index security articles and query them with TF-IDF ranking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest article records from JSON/JSONL files or a directory
    Ingest {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Article store directory
        #[arg(long)]
        store: String,
    },
    /// Run a query against the stored articles
    Query {
        /// Article store directory
        #[arg(long)]
        store: String,
        /// Query text
        #[arg(long)]
        q: String,
        /// Maximum number of hits to print
        #[arg(long, default_value_t = 10)]
        k: usize,
    },
    /// List articles filed under a topic (including subtopics)
    Topics {
        /// Article store directory
        #[arg(long)]
        store: String,
        /// Topic label
        #[arg(long)]
        topic: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest { input, store } => ingest(&input, &store),
        Commands::Query { store, q, k } => query(&store, &q, k),
        Commands::Topics { store, topic } => topics(&store, &topic),
    }
}

fn ingest(input: &str, store_dir: &str) -> Result<()> {
    let paths = StorePaths::new(store_dir);
    let engine = SearchEngine::new();
    if paths.articles().exists() {
        engine.ingest_articles(load_articles(&paths)?);
    }

    let mut records: Vec<RawArticle> = Vec::new();
    for file in discover_inputs(Path::new(input)) {
        records.extend(read_records(&file)?);
    }
    let received = records.len();
    let added = engine.ingest(records);
    save_articles(&paths, &engine.articles())?;

    tracing::info!(received, added, total = engine.count(), "ingest complete");
    Ok(())
}

fn query(store_dir: &str, q: &str, k: usize) -> Result<()> {
    let paths = StorePaths::new(store_dir);
    let engine = SearchEngine::new();
    engine.ingest_articles(load_articles(&paths)?);

    let hits = engine.search(q);
    if hits.is_empty() {
        println!("no results for '{q}'");
    }
    for (rank, (article, score)) in hits.iter().take(k.max(1)).enumerate() {
        println!(
            "{:>2}. {score:.4}  {}  [{}]  {}",
            rank + 1,
            article.title,
            article.topic,
            article.url
        );
    }

    SearchHistory::new(paths.history()).add(q)?;
    Ok(())
}

fn topics(store_dir: &str, topic: &str) -> Result<()> {
    let paths = StorePaths::new(store_dir);
    let engine = SearchEngine::new();
    engine.ingest_articles(load_articles(&paths)?);

    let articles = engine.articles_under(topic);
    if articles.is_empty() {
        println!("no articles under '{topic}'");
    }
    for article in articles {
        println!("{}  {}  {}", article.id, article.title, article.url);
    }
    Ok(())
}

fn discover_inputs(input: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

fn read_records(file: &Path) -> Result<Vec<RawArticle>> {
    if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        return read_jsonl(file);
    }
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    let mut records = Vec::new();
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                records.push(serde_json::from_value(v)?);
            }
        }
        serde_json::Value::Object(_) => records.push(serde_json::from_value(json)?),
        _ => anyhow::bail!("unsupported record file shape: {}", file.display()),
    }
    Ok(records)
}

fn read_jsonl(file: &Path) -> Result<Vec<RawArticle>> {
    let reader = BufReader::new(File::open(file)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_json_files_in_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), "[]").unwrap();
        std::fs::write(dir.path().join("b.jsonl"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "skip me").unwrap();
        let found = discover_inputs(dir.path());
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn reads_array_object_and_jsonl_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let rec = r#"{"title":"t","url":"https://e.com/1","topic":"Malware","body":"b"}"#;

        let array = dir.path().join("array.json");
        std::fs::write(&array, format!("[{rec},{rec}]")).unwrap();
        assert_eq!(read_records(&array).unwrap().len(), 2);

        let object = dir.path().join("object.json");
        std::fs::write(&object, rec).unwrap();
        assert_eq!(read_records(&object).unwrap().len(), 1);

        let jsonl = dir.path().join("lines.jsonl");
        std::fs::write(&jsonl, format!("{rec}\n\n{rec}\n")).unwrap();
        assert_eq!(read_records(&jsonl).unwrap().len(), 2);
    }
}
