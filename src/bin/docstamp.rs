// src/bin/docstamp.rs
use clap::Parser;
use colored::*;
use docstamp::{InjectStats, Injector};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "docstamp")]
#[command(author = "Docstamp Team")]
#[command(version)]
#[command(about = "Inject git metadata into documentation files", long_about = None)]
struct Cli {
    /// Target documentation files
    #[arg(default_value = "docs/api/instance.md")]
    files: Vec<PathBuf>,

    /// Placeholder token replaced with the resolved revision
    #[arg(short, long, default_value = "{{HASH}}")]
    token: String,

    /// Use the abbreviated revision for the placeholder
    #[arg(long)]
    short: bool,

    /// Also resolve the {{HASH_SHORT}} and {{DATE}} placeholders
    #[arg(long)]
    all_tokens: bool,

    /// Resolve and report without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Fail when a target file does not contain the placeholder
    #[arg(long)]
    check: bool,

    /// Print a JSON run summary on stdout
    #[arg(long)]
    json: bool,

    #[arg(short, long, help = "Verbose output")]
    verbose: bool,

    #[arg(short, long, help = "Suppress per-file status lines")]
    quiet: bool,

    #[arg(long, help = "Disable colored output")]
    no_color: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<i32, docstamp::InjectError> {
    let start_time = Instant::now();

    // Revision resolution comes first: if it fails, no file is touched.
    let injector = Injector::from_git()?
        .primary_token(&cli.token)
        .use_short(cli.short)
        .with_companions(cli.all_tokens)
        .dry_run(cli.dry_run);

    if cli.verbose {
        println!("{} docstamp v{}", "ℹ".blue(), docstamp::VERSION);
        println!("{} Built from: {}", "ℹ".blue(), docstamp::git_commit_hash());
        println!("{} Run at:     {}", "ℹ".blue(), docstamp::build_timestamp());
        println!("{} Revision:   {}", "ℹ".blue(), injector.revision());
        println!("{} Token:      {}", "ℹ".blue(), injector.token());
        if cli.dry_run {
            println!("{} Dry run: no files will be written", "⚠".yellow());
        }
    }

    let progress = if cli.files.len() > 1 && !cli.quiet {
        let pb = ProgressBar::new(cli.files.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files")
                .unwrap()
                .progress_chars("█▓▒░"),
        );
        Some(pb)
    } else {
        None
    };

    let mut stats = InjectStats::new();
    let mut reports = Vec::with_capacity(cli.files.len());
    let mut missing_token = Vec::new();

    for path in &cli.files {
        let report = injector.inject(path)?;

        if !report.had_token {
            missing_token.push(path.clone());
            if !cli.quiet {
                println!(
                    "{} {}: no `{}` placeholder found",
                    "⚠".yellow(),
                    path.display(),
                    injector.token()
                );
            }
        } else if !cli.quiet {
            let verb = if cli.dry_run { "would update" } else { "updated" };
            println!(
                "{} {}: {} ({} replacement{})",
                "✓".green(),
                path.display(),
                verb,
                report.replaced,
                if report.replaced == 1 { "" } else { "s" }
            );
        }

        stats.absorb(&report);
        reports.push(report);

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let elapsed = start_time.elapsed();

    if cli.json {
        let summary = serde_json::json!({
            "revision": injector.revision(),
            "token": injector.token(),
            "dry_run": cli.dry_run,
            "files": reports,
            "stats": stats,
            "elapsed_ms": elapsed.as_millis(),
        });
        println!("{}", serde_json::to_string_pretty(&summary).unwrap_or_default());
    } else if !cli.quiet && cli.files.len() > 1 {
        print_summary(&stats, elapsed);
    }

    if cli.check && !missing_token.is_empty() {
        eprintln!(
            "{} {} file{} missing the `{}` placeholder",
            "✗".red(),
            missing_token.len(),
            if missing_token.len() == 1 { "" } else { "s" },
            injector.token()
        );
        return Ok(1);
    }

    Ok(0)
}

fn print_summary(stats: &InjectStats, elapsed: std::time::Duration) {
    let border = "─".repeat(50);
    println!("\n{}", border.dimmed());
    println!("{} INJECTION SUMMARY", "📊".cyan());
    println!("{}", border.dimmed());

    println!("  {} Files:        {}", "📁".blue(), stats.files);
    println!("  {} Updated:      {}", "✓".green(), stats.changed);
    println!("  {} Replacements: {}", "🔧".blue(), stats.replaced);
    println!(
        "  {} Time:         {:.2}ms",
        "⏱".blue(),
        elapsed.as_secs_f64() * 1000.0
    );
}
