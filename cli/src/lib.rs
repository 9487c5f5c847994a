use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use search_core::{DocId, DocumentStatus, SearchConfig, SearchHit, SearchServer, StopWords};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// One document as read from a `.json` / `.jsonl` input file.
#[derive(Debug, Clone, Deserialize)]
pub struct InputDoc {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl From<StatusArg> for DocumentStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Actual => DocumentStatus::Actual,
            StatusArg::Irrelevant => DocumentStatus::Irrelevant,
            StatusArg::Banned => DocumentStatus::Banned,
            StatusArg::Removed => DocumentStatus::Removed,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub accepted: usize,
    pub rejected: usize,
}

#[derive(Serialize)]
struct SearchResponse<'a> {
    query: &'a str,
    total_hits: usize,
    results: &'a [SearchHit],
}

#[derive(Serialize)]
struct MatchResponse<'a> {
    query: &'a str,
    doc_id: DocId,
    status: DocumentStatus,
    words: &'a [String],
}

/// Read a ranking config from JSON; missing fields keep their defaults.
pub fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    let Some(path) = path else { return Ok(SearchConfig::default()) };
    let f = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

pub fn build_server(stop_words: &str, config: SearchConfig) -> Result<SearchServer> {
    let stop_words = StopWords::from_text(stop_words).context("invalid stop words")?;
    Ok(SearchServer::with_config(stop_words, config))
}

/// Collect `.json` / `.jsonl` files under `input` (or `input` itself).
pub fn collect_input_files(input: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

/// Load documents from a file, a directory, or `-` (JSON lines on stdin).
pub fn load_documents(input: &str) -> Result<Vec<InputDoc>> {
    if input == "-" {
        return read_jsonl(std::io::stdin().lock()).context("reading documents from stdin");
    }
    let path = Path::new(input);
    if !path.exists() {
        bail!("input path {input} does not exist");
    }
    let mut docs = Vec::new();
    for file in collect_input_files(path) {
        let f = File::open(&file).with_context(|| format!("opening {}", file.display()))?;
        let reader = BufReader::new(f);
        let mut batch = if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(reader)
        } else {
            read_json(reader)
        }
        .with_context(|| format!("reading {}", file.display()))?;
        tracing::debug!(file = %file.display(), documents = batch.len(), "loaded input file");
        docs.append(&mut batch);
    }
    Ok(docs)
}

fn read_jsonl<R: BufRead>(reader: R) -> Result<Vec<InputDoc>> {
    let mut docs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        docs.push(serde_json::from_str(&line)?);
    }
    Ok(docs)
}

fn read_json<R: std::io::Read>(reader: R) -> Result<Vec<InputDoc>> {
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            let docs: Vec<InputDoc> =
                arr.into_iter().map(serde_json::from_value).collect::<Result<_, _>>()?;
            Ok(docs)
        }
        serde_json::Value::Object(_) => Ok(vec![serde_json::from_value(json)?]),
        _ => Ok(Vec::new()),
    }
}

/// Add every document, reporting and skipping the ones the engine rejects.
pub fn ingest<I>(server: &mut SearchServer, docs: I) -> IngestStats
where
    I: IntoIterator<Item = InputDoc>,
{
    let mut stats = IngestStats::default();
    for doc in docs {
        match server.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
            Ok(()) => stats.accepted += 1,
            Err(err) => {
                tracing::warn!(doc_id = doc.id, error = %err, "error adding document");
                stats.rejected += 1;
            }
        }
    }
    tracing::info!(
        accepted = stats.accepted,
        rejected = stats.rejected,
        num_docs = server.document_count(),
        "ingested documents"
    );
    stats
}

/// Run each query and print its ranked hits. A failing query is reported and skipped.
pub fn run_search<W: Write>(
    server: &SearchServer,
    queries: &[String],
    status: DocumentStatus,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    for query in queries {
        if format == OutputFormat::Text {
            writeln!(out, "Search result for the query : {query}")?;
        }
        let hits = match server.find_top_documents_by_status(query, status) {
            Ok(hits) => hits,
            Err(err) => {
                tracing::warn!(query = %query, error = %err, "search error");
                continue;
            }
        };
        match format {
            OutputFormat::Text => {
                for hit in &hits {
                    writeln!(out, "{}", format_hit(hit))?;
                }
            }
            OutputFormat::Json => {
                let resp = SearchResponse { query, total_hits: hits.len(), results: &hits };
                writeln!(out, "{}", serde_json::to_string(&resp)?)?;
            }
        }
    }
    Ok(())
}

/// For each query, match it against every document in insertion order.
/// A query error ends that query's sweep.
pub fn run_match<W: Write>(
    server: &SearchServer,
    queries: &[String],
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    for query in queries {
        if format == OutputFormat::Text {
            writeln!(out, "Match documents on request: {query}")?;
        }
        for position in 0..server.document_count() {
            let doc_id = server.document_id(position)?;
            let (words, status) = match server.match_document(query, doc_id) {
                Ok(m) => m,
                Err(err) => {
                    tracing::warn!(query = %query, error = %err, "error matching documents");
                    break;
                }
            };
            match format {
                OutputFormat::Text => writeln!(out, "{}", format_match(doc_id, &words, status))?,
                OutputFormat::Json => {
                    let resp = MatchResponse { query, doc_id, status, words: &words };
                    writeln!(out, "{}", serde_json::to_string(&resp)?)?;
                }
            }
        }
    }
    Ok(())
}

pub fn format_hit(hit: &SearchHit) -> String {
    format!(
        "{{ document_id = {}, relevance = {:.6}, rating = {} }}",
        hit.doc_id, hit.relevance, hit.rating
    )
}

pub fn format_match(doc_id: DocId, words: &[String], status: DocumentStatus) -> String {
    let words: String = words.iter().map(|w| format!(" {w}")).collect();
    format!("{{ document_id = {doc_id}, status = {}, words ={words} }}", status as i32)
}

/// The built-in walkthrough: a few valid and invalid documents, then queries
/// and match sweeps, some of them malformed.
pub fn run_demo<W: Write>(config: SearchConfig, format: OutputFormat, out: &mut W) -> Result<()> {
    let mut server = build_server("and in on% /", config)?;
    let doc = |id: DocId, text: &str, ratings: &[i32]| InputDoc {
        id,
        text: text.to_string(),
        status: DocumentStatus::Actual,
        ratings: ratings.to_vec(),
    };
    let docs = vec![
        doc(1, "fluffy cat fluffy tail", &[8, 2, 3, 4]),
        doc(2, "fluffy dog and stylish collar", &[1, 2, 3, 4]),
        doc(-1, "fluffy dog and stylish collar", &[1, 2, 3, 4]),
        doc(2, "big fluffy cat big dog", &[1, 2, 3, 4, 5]),
        doc(3, "big dog star\x12ling evgeny", &[1, 3, 2, 4, 5]),
        doc(4, "big fluffy dog and fluffy cat", &[1, 2, 3, 4, 5]),
        doc(5, "fluffy cat fluffy cat-dog", &[8, 2, 3, 4]),
    ];
    ingest(&mut server, docs);

    let searches: Vec<String> = [
        "fluffy -dog",
        "fluffy -cat",
        "fluffy cat",
        "fluffy --cat",
        "fluffy -",
        "cat-dog",
        "fluffy\x12 -",
    ]
    .iter()
    .map(|q| q.to_string())
    .collect();
    run_search(&server, &searches, DocumentStatus::Actual, format, out)?;

    let matches: Vec<String> =
        ["fluffy dog", "cat -fluffy", "stylish --dog", "fluffy - tail", "fluffy  tail\x12"]
            .iter()
            .map(|q| q.to_string())
            .collect();
    run_match(&server, &matches, format, out)
}
