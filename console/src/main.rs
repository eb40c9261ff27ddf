use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use searchcore::{
    process_queries, Document, DocumentId, DocumentStatus, ExecutionPolicy, RequestQueue, SearchServer,
};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocumentId,
    text: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Parser)]
#[command(name = "console")]
#[command(about = "Query an in-memory TF-IDF search server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in sample corpus and queries
    Demo,
    /// Load documents and run queries against them
    Search {
        /// Input path (JSON/JSONL file or a directory of them)
        #[arg(long)]
        input: String,
        /// Space-separated stop words
        #[arg(long, default_value = "")]
        stop_words: String,
        /// Only return documents with this status
        #[arg(long)]
        status: Option<DocumentStatus>,
        /// Run all queries concurrently (ACTUAL documents only)
        #[arg(long, default_value_t = false)]
        batch: bool,
        /// Queries; prefix a word with '-' to exclude documents containing it
        #[arg(required = true)]
        queries: Vec<String>,
    },
    /// Print the matched query words of every document
    Match {
        #[arg(long)]
        input: String,
        #[arg(long, default_value = "")]
        stop_words: String,
        /// Match words concurrently
        #[arg(long, default_value_t = false)]
        parallel: bool,
        query: String,
    },
    /// Remove documents whose word sets repeat an earlier document
    Dedup {
        #[arg(long)]
        input: String,
        #[arg(long, default_value = "")]
        stop_words: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo => run_demo(),
        Commands::Search { input, stop_words, status, batch, queries } => {
            let server = load_server(&input, &stop_words)?;
            run_search(&server, status, batch, &queries)
        }
        Commands::Match { input, stop_words, parallel, query } => {
            let server = load_server(&input, &stop_words)?;
            let policy = if parallel { ExecutionPolicy::Parallel } else { ExecutionPolicy::Sequential };
            timed("match_documents", || match_documents(&server, policy, &query))
        }
        Commands::Dedup { input, stop_words } => {
            let mut server = load_server(&input, &stop_words)?;
            let before = server.document_count();
            let removed = timed("remove_duplicates", || server.remove_duplicates());
            println!("{}", serde_json::json!({ "before": before, "removed": removed, "after": server.document_count() }));
            Ok(())
        }
    }
}

/// Run `f` and log how long it took.
fn timed<T>(operation: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    let elapsed = start.elapsed();
    tracing::info!(operation, took_ms = elapsed.as_millis() as u64, took_s = elapsed.as_secs_f64(), "operation finished");
    out
}

fn load_server(input: &str, stop_words: &str) -> Result<SearchServer> {
    let mut server = SearchServer::from_stop_text(stop_words)?;
    let input_path = Path::new(input);

    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).into_iter().filter_map(|e| e.ok()) {
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
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    } else {
        bail!("input path {input} does not exist");
    }

    for file in files {
        let docs = if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file)?
        } else {
            read_json(&file)?
        };
        for doc in docs {
            add_document(&mut server, doc);
        }
    }
    tracing::info!(num_docs = server.document_count(), "loaded documents");
    Ok(server)
}

fn read_jsonl(file: &Path) -> Result<Vec<InputDoc>> {
    let reader = BufReader::new(File::open(file)?);
    let mut docs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        docs.push(serde_json::from_str(&line)?);
    }
    Ok(docs)
}

fn read_json(file: &Path) -> Result<Vec<InputDoc>> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    let docs = match json {
        serde_json::Value::Array(arr) => {
            arr.into_iter().map(serde_json::from_value).collect::<Result<Vec<_>, _>>()?
        }
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => Vec::new(),
    };
    Ok(docs)
}

/// Engine errors on a single document are reported and loading goes on.
fn add_document(server: &mut SearchServer, doc: InputDoc) {
    if let Err(err) = server.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
        tracing::warn!(document_id = doc.id, error = %err, "failed to add document");
    }
}

fn run_search(server: &SearchServer, status: Option<DocumentStatus>, batch: bool, queries: &[String]) -> Result<()> {
    if batch {
        if status.is_some_and(|s| s != DocumentStatus::Actual) {
            bail!("--batch only searches ACTUAL documents");
        }
        let results = timed("process_queries", || process_queries(server, queries))?;
        for (query, docs) in queries.iter().zip(results) {
            print_results(query, &docs)?;
        }
        return Ok(());
    }

    let mut requests = RequestQueue::new(server);
    for query in queries {
        let found = timed("find_top_documents", || {
            requests.add_find_request_with_status(query, status.unwrap_or_default())
        });
        match found {
            Ok(docs) => print_results(query, &docs)?,
            Err(err) => tracing::warn!(query = %query, error = %err, "search failed"),
        }
    }
    tracing::info!(empty = requests.no_result_requests(), total = requests.len(), "request statistics");
    Ok(())
}

fn print_results(query: &str, docs: &[Document]) -> Result<()> {
    println!("{}", serde_json::to_string(&serde_json::json!({ "query": query, "results": docs }))?);
    Ok(())
}

fn match_documents(server: &SearchServer, policy: ExecutionPolicy, query: &str) -> Result<()> {
    println!("Matching documents for query: {query}");
    for document_id in server {
        let (words, status) = server.match_document_with(policy, query, document_id)?;
        println!("{{ document_id = {document_id}, status = {status}, words = {} }}", words.join(" "));
    }
    Ok(())
}

fn find_top_documents(server: &SearchServer, raw_query: &str) {
    println!("Search results for query: {raw_query}");
    match server.find_top_documents(raw_query) {
        Ok(docs) => docs.iter().for_each(|doc| println!("{doc}")),
        Err(err) => println!("Search failed: {err}"),
    }
}

fn run_demo() -> Result<()> {
    let mut server = SearchServer::from_stop_text("and in at")?;
    let corpus: [(DocumentId, &str, DocumentStatus, &[i32]); 6] = [
        (1, "curly cat curly tail", DocumentStatus::Banned, &[7, 2, 7]),
        (2, "curly dog and fancy collar", DocumentStatus::Actual, &[1, 2, 3]),
        (3, "big cat fancy collar ", DocumentStatus::Removed, &[1, 2, 8]),
        (4, "big dog sparrow Eugene", DocumentStatus::Irrelevant, &[1, 3, 2]),
        (5, "big dog sparrow Vasiliy", DocumentStatus::Irrelevant, &[1, 1, 1]),
        (6, "big sparrow", DocumentStatus::Actual, &[5, 3, 6]),
    ];
    for (id, text, status, ratings) in corpus {
        server.add_document(id, text, status, ratings)?;
    }

    println!("Query 1:");
    for doc in server.find_top_documents("big white dog")? {
        println!("{doc}");
    }
    println!("Query 2:");
    for doc in server.find_top_documents_with_status("big white dog", DocumentStatus::Irrelevant)? {
        println!("{doc}");
    }
    println!("Query 3:");
    for doc in server.find_top_documents("big white dog fancy collar")? {
        println!("{doc}");
    }
    println!("Query 4:");
    let found = server.find_top_documents_by("big cat white dog fancy collar", &|id, status, rating| {
        id > 2 && matches!(status, DocumentStatus::Irrelevant | DocumentStatus::Actual) && rating > 1
    })?;
    for doc in found {
        println!("{doc}");
    }

    timed("request_queue", || -> Result<()> {
        let mut requests = RequestQueue::new(&server);
        for _ in 0..1439 {
            requests.add_find_request("empty request")?;
        }
        println!("Total empty requests: {}", requests.no_result_requests());
        for query in ["curly dog", "big collar", "sparrow"] {
            requests.add_find_request(query)?;
            println!("After {query:?} total empty requests: {}", requests.no_result_requests());
        }
        Ok(())
    })?;

    timed("match_documents", || match_documents(&server, ExecutionPolicy::Parallel, "big white dog"))?;
    timed("find_top_documents", || find_top_documents(&server, "big white dog"));

    let mut pets = SearchServer::from_stop_text("and with")?;
    let texts = [
        "funny pet and nasty rat",
        "funny pet with curly hair",
        "funny pet with curly hair",
        "funny pet and curly hair",
        "funny funny pet and nasty nasty rat",
        "funny pet and not very nasty rat",
        "very nasty rat and not very funny pet",
        "pet with rat and rat and rat",
        "nasty rat with curly hair",
    ];
    for (id, text) in (1..).zip(texts) {
        pets.add_document(id, text, DocumentStatus::Actual, &[1, 2])?;
    }
    println!("Before duplicates removed: {}", pets.document_count());
    for id in pets.remove_duplicates() {
        println!("Found duplicate document id {id}");
    }
    println!("After duplicates removed: {}", pets.document_count());
    Ok(())
}
