use anyhow::{Context, Result};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use report_review::cli::{self, Commands, ListArgs, StatusArgs};
use report_review::intake::check_file;
use report_review::state::ReviewStore;
use report_review::tui::{App, run_tui};

fn main() -> Result<()> {
    init_logging();
    let args = cli::parse_args();

    match args.command {
        None => {
            if let Some(path) = &args.file {
                check_file(path).with_context(|| format!("Cannot analyze {}", path.display()))?;
            }
            let app = App::new(ReviewStore::with_sample(), args.file, args.skip_intake);
            run_tui(app, Duration::from_millis(args.tick_ms.max(1)))?;
        }
        Some(Commands::Status(status_args)) => {
            handle_status(&status_args);
        }
        Some(Commands::List(list_args)) => {
            handle_list(&list_args);
        }
    }

    Ok(())
}

/// Log to stderr, silent unless `RUST_LOG` asks for something.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Apply `--resolve` toggles to a fresh sample store.
fn store_with_toggles(ids: &[String]) -> ReviewStore {
    let mut store = ReviewStore::with_sample();
    for id in ids {
        if store.toggle_status(id).is_none() {
            eprintln!("⚠ No finding with id '{}', ignored", id);
        }
    }
    store
}

/// Handle the status command - print summary counts and category breakdown.
fn handle_status(args: &StatusArgs) {
    let store = store_with_toggles(&args.resolve);
    let stats = store.stats();

    println!("Review Summary");
    println!("─────────────────────────────────────");
    println!("  Total issues:   {}", stats.total_issues);
    println!("  Critical (open): {}", stats.critical_count);
    println!("  Major (open):    {}", stats.major_count);
    println!("  Minor (open):    {}", stats.minor_count);
    println!("  Resolved:       {}", stats.resolved_count);

    let breakdown = store.category_breakdown();
    if breakdown.is_empty() {
        println!("\n✓ All issues resolved!");
        return;
    }

    println!("\nOpen issues by category");
    for entry in breakdown {
        println!("  {:10} {}", entry.category.as_str(), entry.count);
    }
}

/// Handle the list command - print one category's findings in display order.
fn handle_list(args: &ListArgs) {
    let store = store_with_toggles(&args.resolve);
    let (resolved, total) = store.category_progress(args.category);

    println!("{} Review ({} / {} Fixed)", args.category, resolved, total);
    println!("─────────────────────────────────────");

    let items = store.items_by_category(args.category);
    if items.is_empty() {
        println!("No issues found in this category.");
        return;
    }

    for item in items {
        let marker = if item.is_open() { "○" } else { "✓" };
        println!(
            "{} {:8} {:6} Page {:<18} {}",
            marker,
            item.severity(),
            item.id(),
            item.page().to_string(),
            item.issue()
        );
        println!("    Correction: {}", item.suggestion());
    }
}
