use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

use ragdb_answer::openai::OpenAiGenerator;
use ragdb_core::config::{expand_path, RagConfig};
use ragdb_core::error::Error;
use ragdb_core::traits::Generator;
use ragdb_core::types::Answer;
use ragdb_embed::get_default_embedder;
use ragdb_index::MemoryIndex;
use ragdb_pipeline::RagPipeline;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <data_dir> [question]", args[0]);
        eprintln!("Example: {} ./docs 'how do I winterize the well pump?'", args[0]);
        std::process::exit(1);
    }
    let data_dir = expand_path(&args[1]);
    let question = if args.len() > 2 { Some(args[2..].join(" ")) } else { None };

    let config = RagConfig::load()?;
    let generator: Option<Box<dyn Generator>> = config
        .openai_api_key
        .as_deref()
        .map(|key| Box::new(OpenAiGenerator::new(key, config.openai_model.clone())) as Box<dyn Generator>);
    if generator.is_none() {
        println!("ℹ️  No RAGDB_OPENAI_API_KEY configured; answers will be extractive.");
    }
    let pipeline =
        RagPipeline::new(get_default_embedder()?, Box::new(MemoryIndex::new()), generator, config)?;

    let files = list_txt_files(&data_dir);
    if files.is_empty() {
        println!("No .txt files found under {}.", data_dir.display());
        return Ok(());
    }
    println!("📚 Ingesting {} files from {}", files.len(), data_dir.display());
    let bar = ProgressBar::new(files.len() as u64);
    let mut total_chunks = 0usize;
    for path in &files {
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let blocks = read_blocks(path)?;
        total_chunks += pipeline.ingest(&source, &blocks)?;
        bar.inc(1);
    }
    bar.finish_and_clear();
    println!("✅ Indexed {} chunks from {} files", total_chunks, files.len());

    match question {
        Some(q) => print_answer(&pipeline.answer(&q)?),
        None => {
            println!("\nAsk a question (empty line to quit):");
            let stdin = io::stdin();
            loop {
                print!("> ");
                io::stdout().flush()?;
                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    break;
                }
                let q = line.trim();
                if q.is_empty() {
                    break;
                }
                print_answer(&pipeline.answer(q)?);
            }
        }
    }
    Ok(())
}

/// One text block per file; per-page splitting belongs to the format
/// extractor for structured formats like PDF.
fn read_blocks(path: &Path) -> Result<Vec<String>, Error> {
    let content = fs::read_to_string(path).map_err(|e| Error::Extraction(e.into()))?;
    Ok(vec![content])
}

fn list_txt_files(root: &Path) -> Vec<PathBuf> {
    let mut txt_files = Vec::new();
    for entry in walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("txt") {
            txt_files.push(path.to_path_buf());
        }
    }
    txt_files.sort();
    txt_files
}

fn print_answer(answer: &Answer) {
    println!("\n💡 {}\n", answer.answer);
    for (i, hit) in answer.sources.iter().enumerate() {
        println!(
            "  {}. relevance={:.4}  source={} @ {}-{}",
            i + 1,
            hit.relevance,
            hit.provenance.source,
            hit.provenance.start,
            hit.provenance.end
        );
    }
}
