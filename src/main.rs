//! workorder - Main CLI entry point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use workorder::{
    cli::{Args, Commands, Verbosity},
    composition::EmailWriter,
    config::Config,
    document::{Document, DocumentIndex, SearchParams},
    llm::AzureOpenAiClient,
    pipeline::Pipeline,
    retrieval::RetrievalEngine,
    telemetry::TelemetryCollector,
    PipelineError,
};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        let code = e
            .downcast_ref::<PipelineError>()
            .map(PipelineError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(args: &Args) -> Result<()> {
    if let Some(Commands::Config) = &args.command {
        let config = Config::load()?;
        println!("{}", config.redacted_display());
        return Ok(());
    }

    let report_path = args
        .report
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("no report given (usage: workorder <REPORT>)"))?;

    let verbosity = args.verbosity();
    let config = Config::load()?;

    let index = index_report(report_path, &config, verbosity)?;
    let question = resolve_question(args)?;

    let client = Arc::new(AzureOpenAiClient::new(
        &config.azure,
        &config.settings.model,
    )?);

    let params = SearchParams {
        top_k: args.top_k.unwrap_or(config.settings.search.top_k),
        threshold: args.threshold.unwrap_or(config.settings.search.threshold),
    };

    let retrieval = RetrievalEngine::new(index, client.clone(), params);
    let composition = EmailWriter::new(client, config.settings.signature.clone());

    let telemetry = Arc::new(TelemetryCollector::new());
    let pipeline = Pipeline::new(retrieval, composition).with_observer(telemetry.clone());

    let spinner = progress_spinner(verbosity, "Drafting work order...");
    let outcome = pipeline.run(&question).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let outcome = outcome?;

    if verbosity != Verbosity::Quiet {
        println!("{}", "Findings".bold().underline());
        println!("{}\n", outcome.retrieval.answer.trim());
        println!("{}", "Contractor email".bold().underline());
    }
    println!("{}", outcome.composition.email);

    if verbosity.show_summary() {
        eprintln!("\n{} {}", "telemetry:".dimmed(), telemetry.summary().dimmed());
    }

    Ok(())
}

/// Load and index the report once, behind a spinner
fn index_report(
    path: &Path,
    config: &Config,
    verbosity: Verbosity,
) -> Result<Arc<DocumentIndex>> {
    let spinner = progress_spinner(verbosity, "Indexing report...");

    let document = Document::load(path)?;
    let index = DocumentIndex::build(&document, config.settings.search.max_chunk_chars);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if verbosity == Verbosity::Verbose {
        eprintln!(
            "{} indexed {} chunks from {}",
            "info:".dimmed(),
            index.len(),
            path.display()
        );
    }

    Ok(Arc::new(index))
}

/// Use --question when given; otherwise ask once on stdin
fn resolve_question(args: &Args) -> Result<String> {
    if let Some(question) = &args.question {
        return Ok(question.clone());
    }

    print!("Which section of the report would you like to generate a work order for?\n> ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let question = line.trim().to_string();

    if question.is_empty() {
        anyhow::bail!("no question given");
    }

    Ok(question)
}

fn progress_spinner(verbosity: Verbosity, message: &'static str) -> Option<ProgressBar> {
    if !verbosity.show_progress() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Some(pb)
}
