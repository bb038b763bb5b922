//! # jobpack CLI
//!
//! Command-line interface for jobpack library.

use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobpack::JobpackError;
use jobpack::cli::{Args, adjust_output_extension};
use jobpack::format::{ExportFormat, export_to_format};
use jobpack::service::JobService;
use jobpack::store::BatchStore;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "jobpack=info" } else { "jobpack=warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<(), JobpackError> {
    let total_start = Instant::now();

    let output_path = adjust_output_extension(&args.output, args.format);
    let format: ExportFormat = args.format.into();

    // Print header
    println!("📦 jobpack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", format);
    println!();

    // Step 1: Upload (split HTML, extract, clean)
    let filename = Path::new(&args.input)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.clone());
    let content = std::fs::read_to_string(&args.input)?;

    let service = JobService::new(Arc::new(BatchStore::new()));

    println!("⏳ Extracting job posts...");
    let parse_start = Instant::now();
    let stats = service.upload(&filename, &content)?;
    println!(
        "   Found {} job posts in {} messages ({:.2}s)",
        stats.output_count,
        stats.input_count,
        parse_start.elapsed().as_secs_f64()
    );
    if stats.skipped > 0 {
        println!("⚠️  Skipped {} messages", stats.skipped);
    }

    // Step 2: Write output in selected format
    println!("💾 Writing {}...", format);
    let write_start = Instant::now();
    export_to_format(&service, &output_path, format)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    println!();
    println!("✅ Done! Output saved to {}", output_path);

    // Summary
    let analysis = service.analyze()?;
    println!();
    println!("📊 Summary:");
    println!("   Job posts:      {}", analysis.total_jobs);
    println!("   With contacts:  {}", analysis.jobs_with_contacts);
    println!("   Contacts:       {}", analysis.total_contacts);
    println!("   Unique emails:  {}", analysis.unique_emails);
    println!("   Extraction:     {}", analysis.contact_extraction_rate);

    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
