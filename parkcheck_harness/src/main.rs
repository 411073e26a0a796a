//! Park server conformance checker CLI
//!
//! Replays scripted stories against a running park simulation server and
//! reports pass/fail per story.

use clap::Parser;
use parkcheck_harness::{StoryId, StoryOutcome, StoryReport, StoryRunner};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Park simulation server conformance checker
#[derive(Parser, Debug)]
#[command(name = "parkcheck")]
#[command(about = "Run conformance stories against a park simulation server", long_about = None)]
struct Args {
    /// Base URL of the server under test
    #[arg(short, long, default_value = "http://localhost:8181")]
    endpoint: String,

    /// Story index to run (repeatable; default is every story in order)
    #[arg(short, long)]
    story: Vec<usize>,

    /// List the registered stories and exit
    #[arg(short, long)]
    list_stories: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for CI parsing
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    if args.list_stories {
        info!("Registered stories");
        for (index, story) in StoryId::all().iter().enumerate() {
            info!("{:>2}: {} - {}", index, story.name(), story.description());
        }
        return;
    }

    // Resolve the selection up front so a bad index never starts a run.
    let stories: Vec<StoryId> = if args.story.is_empty() {
        StoryId::all()
    } else {
        let mut selected = Vec::with_capacity(args.story.len());
        for index in &args.story {
            match StoryId::from_index(*index) {
                Some(story) => selected.push(story),
                None => {
                    eprintln!("Error: no story with index {}", index);
                    eprintln!("Run with --list-stories to see the registered stories");
                    std::process::exit(1);
                }
            }
        }
        selected
    };

    if !args.json {
        info!("parkcheck v0.1.0 - target {}", args.endpoint);
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    let runner = StoryRunner::new(&args.endpoint);
    let mut reports: Vec<StoryReport> = Vec::new();
    let mut failed_count = 0;

    for story in &stories {
        let report = runner.run(*story).await;

        if !args.json {
            match &report.outcome {
                StoryOutcome::Passed => info!("✓ {} PASSED", story.name()),
                StoryOutcome::Failed(reason) => {
                    error!("✗ {} FAILED: {}", story.name(), reason)
                }
                StoryOutcome::Errored(reason) => {
                    error!("✗ {} ERROR: {}", story.name(), reason)
                }
            }
        }

        if !report.outcome.is_pass() {
            failed_count += 1;
        }
        reports.push(report);
    }

    // Summary
    let total = reports.len();
    let passed = total - failed_count;

    if args.json {
        // JSON output for CI parsing
        let summary = serde_json::json!({
            "endpoint": args.endpoint,
            "total": total,
            "passed": passed,
            "failed": failed_count,
            "results": reports.iter().map(|report| {
                serde_json::json!({
                    "story": report.story.name(),
                    "outcome": report.outcome.label(),
                    "reason": report.outcome.reason(),
                })
            }).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&summary).unwrap());
    } else {
        info!("");
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        if failed_count == 0 {
            info!("✅ All {} stories passed!", total);
        } else {
            error!("❌ {}/{} stories did not pass!", failed_count, total);

            for report in &reports {
                if let Some(reason) = report.outcome.reason() {
                    error!("  - {}: {}", report.story.name(), reason);
                }
            }
        }
    }

    // Exit with proper code for CI
    if failed_count > 0 {
        std::process::exit(1);
    }
}
