// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and prints results; every decision is made in Layer 2.
//
// Two commands are supported:
//   1. `ask`     — answer questions about one document, either
//                  a batch from flags/file or interactively
//   2. `extract` — show what was extracted from a document
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{AskArgs, Commands, ExtractArgs};
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::application::ask_use_case::AskUseCase;
use crate::data::{loader::DocumentLoader, normalizer::TextNormalizer};
use crate::domain::answer::{AnswerStatus, QueryResult};
use crate::domain::document::ContentType;
use crate::domain::traits::QuestionAnswerer;
use crate::infra::report::ResultsReport;

#[derive(Parser, Debug)]
#[command(
    name = "doc-qa",
    version = "0.1.0",
    about = "Answer questions about PDF, DOCX, and text documents."
)]
pub struct Cli {
    /// The subcommand to run (ask or extract)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the subcommand. Routing only.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Ask(args)     => run_ask(args),
            Commands::Extract(args) => run_extract(args),
        }
    }
}

fn run_ask(args: AskArgs) -> Result<()> {
    let config    = args.to_config()?;
    let questions = args.collect_questions()?;
    let report    = args.output.as_deref().map(ResultsReport::new).transpose()?;

    tracing::info!("Loading document: {}", config.document);
    let session = AskUseCase::new(&config)?;

    if questions.is_empty() {
        interactive(&session, report.as_ref(), args.json)?;
    } else {
        let results = session.answer_all(&questions);
        for r in &results {
            print_result(r, args.json)?;
        }
        if let Some(report) = &report {
            report.append(&results)?;
        }
    }

    session.close();
    Ok(())
}

/// Read questions from stdin until `exit` or end of input
fn interactive(session: &AskUseCase, report: Option<&ResultsReport>, json: bool) -> Result<()> {
    let content = session.content();
    println!(
        "Loaded {} text, {} table, {} image characters. Type 'exit' to quit.",
        content.text().chars().count(),
        content.table().chars().count(),
        content.image().chars().count()
    );
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("\nYour Question: ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.eq_ignore_ascii_case("exit") {
            break;
        }
        if question.is_empty() {
            continue;
        }

        let result = session.answer(question).unwrap_or_else(|e| {
            tracing::error!("Error processing question '{}': {:#}", question, e);
            QueryResult::error(question, ContentType::Text)
        });
        print_result(&result, json)?;
        if let Some(report) = report {
            report.append(std::slice::from_ref(&result))?;
        }
    }
    Ok(())
}

fn print_result(r: &QueryResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(r).context("Cannot serialise result")?);
        return Ok(());
    }

    println!("\nQuestion:     {}", r.question);
    println!("Answer:       {}", r.answer);
    println!("Confidence:   {:.2}", r.confidence);
    println!("Content type: {}", r.content_type);

    if r.status == AnswerStatus::Fallback && !r.related.is_empty() {
        println!("Related matches:");
        for (i, m) in r.related.iter().enumerate() {
            println!("  {}. {} ({:.2})", i + 1, m.answer, m.confidence);
        }
    }
    if let Some(guess) = &r.best_effort {
        println!("Best guess below threshold: {} ({:.2})", guess.answer, guess.confidence);
    }
    Ok(())
}

fn run_extract(args: ExtractArgs) -> Result<()> {
    let content = DocumentLoader::new(args.enable_ocr)
        .load_content(Path::new(&args.document), &TextNormalizer::new())?;

    for content_type in [ContentType::Text, ContentType::Table, ContentType::Image] {
        let body = content.get(content_type);
        println!("=== {} ({} chars) ===", content_type, body.chars().count());
        println!("{}\n", body);
    }
    Ok(())
}
