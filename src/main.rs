//! Gapmine - Command Line Interface
//!
//! Mines minimal emerging sequential patterns from two transaction files: a
//! positive collection the patterns must be frequent in and a negative
//! collection they must be rare in.
//!
//! # Commands
//!
//! - **`mine`** - Runs the search and prints every minimal emerging pattern
//! - **`info`** - Loads both files and prints the dataset statistics only
//!
//! # Input Format
//!
//! One transaction per line, items as whitespace-separated unsigned integers.
//! Paths may be local or `s3://bucket/key` (`?anon=true` for public buckets).
//!
//! # Usage Examples
//!
//! ```bash
//! # Patterns in >= 10 positive transactions, <= 1 negative, at most 2 skipped positions
//! gapmine mine positive.txt negative.txt 10 1 2
//!
//! # Same with 8 worker threads
//! gapmine mine positive.txt negative.txt 10 1 2 8
//!
//! # Dataset statistics
//! gapmine info positive.txt negative.txt 10 1
//! ```
//!
//! # Output
//!
//! `mine` writes one pattern per line (original item ids, space-separated,
//! left to right) followed by a run summary.
//!
//! # Exit Codes
//!
//! - `0` - Success
//! - `1` - General error (invalid arguments, unreadable input, mining failure)

use std::env;
use std::process;
use std::str::FromStr;

use gapmine::{MiningParams, TransactionSource};

/// Entry point for the gapmine CLI.
///
/// # Command Structure
///
/// ```text
/// gapmine <command> <arguments...>
/// ```
///
/// # Error Handling
///
/// - Invalid arguments: Prints error message and help, exits with code 1
/// - Unknown commands: Prints error message and help, exits with code 1
/// - Command-specific errors: Handled by respective handler functions
#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    // Handle --help flag
    if args.len() == 2 && (args[1] == "--help" || args[1] == "-h") {
        print_help();
        return;
    }

    if args.len() < 2 {
        eprintln!("Error: Not enough arguments\n");
        print_help();
        process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "mine" => {
            if args.len() != 7 && args.len() != 8 {
                eprintln!("Error: 'mine' command requires <positive> <negative> <pos_min> <neg_max> <gap> [threads]\n");
                print_help();
                process::exit(1);
            }
            let mut params = MiningParams::new(
                parse_arg(&args[4], "pos_min"),
                parse_arg(&args[5], "neg_max"),
                parse_arg(&args[6], "gap"),
            );
            if let Some(threads) = args.get(7) {
                params = params.with_threads(parse_arg(threads, "threads"));
            }
            handle_mine(&args[2], &args[3], params.with_verbose(true)).await;
        }
        "info" => {
            if args.len() != 6 {
                eprintln!("Error: 'info' command requires <positive> <negative> <pos_min> <neg_max>\n");
                print_help();
                process::exit(1);
            }
            let params = MiningParams::new(
                parse_arg(&args[4], "pos_min"),
                parse_arg(&args[5], "neg_max"),
                0,
            );
            handle_info(&args[2], &args[3], params).await;
        }
        _ => {
            eprintln!("Error: Unknown command '{}'\n", command);
            print_help();
            process::exit(1);
        }
    }
}

/// Parses a numeric argument or exits with code 1.
fn parse_arg<T: FromStr>(value: &str, name: &str) -> T {
    match value.parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            eprintln!("Error: <{}> must be a non-negative integer, got '{}'\n", name, value);
            print_help();
            process::exit(1);
        }
    }
}

/// Handles the `mine` command.
///
/// # Output
///
/// ```bash
/// $ gapmine mine positive.txt negative.txt 2 0 0
/// Loading positive.txt and negative.txt...
///   Positive transactions: 3
/// ...
/// 1
/// 3
/// ✓ 2 minimal emerging patterns
/// ```
async fn handle_mine(positive: &str, negative: &str, params: MiningParams) {
    match gapmine::mine(
        TransactionSource::Path(positive.to_string()),
        TransactionSource::Path(negative.to_string()),
        params,
    )
    .await
    {
        Ok(result) => {
            for pattern in &result.patterns {
                let line: Vec<String> = pattern.iter().map(|item| item.to_string()).collect();
                println!("{}", line.join(" "));
            }
            println!("✓ {} minimal emerging patterns", result.patterns.len());
        }
        Err(e) => {
            eprintln!("\n✗ Error during mining: {}", e);
            process::exit(1);
        }
    }
}

async fn handle_info(positive: &str, negative: &str, params: MiningParams) {
    let positive = TransactionSource::Path(positive.to_string());
    let negative = TransactionSource::Path(negative.to_string());
    match gapmine::dataset_info(&positive, &negative, &params).await {
        Ok(info) => {
            println!("================================================================================");
            println!("Dataset Information");
            println!("================================================================================");
            println!();
            println!("Positive file:        {}", positive.name());
            println!("Negative file:        {}", negative.name());
            println!("Min positive support: {}", params.pos_min_support);
            println!("Max negative support: {}", params.neg_max_support);
            println!();
            println!("{}", info);
            println!("================================================================================");
        }
        Err(e) => {
            eprintln!("\n✗ Error loading dataset: {}", e);
            process::exit(1);
        }
    }
}

/// Prints help information for the CLI.
///
/// Called on `--help`/`-h`, on invalid arguments and on an unknown command.
fn print_help() {
    let program = env::args().nth(0).unwrap_or_else(|| "gapmine".to_string());
    println!("Minimal Emerging Sequential Pattern Miner");
    println!();
    println!("USAGE:");
    println!("  {} mine <positive> <negative> <pos_min> <neg_max> <gap> [threads]", program);
    println!("  {} info <positive> <negative> <pos_min> <neg_max>", program);
    println!("  {} --help", program);
    println!();
    println!("COMMANDS:");
    println!("  mine               Find all minimal emerging patterns");
    println!("  info               Show dataset statistics after the initial load");
    println!();
    println!("ARGUMENTS:");
    println!("  <positive>         Transactions the patterns must be frequent in");
    println!("  <negative>         Transactions the patterns must be rare in");
    println!("  <pos_min>          Minimum positive support (>= 1)");
    println!("  <neg_max>          Maximum negative support");
    println!("  <gap>              Maximum number of skipped positions between pattern items");
    println!("  [threads]          Worker threads (default: all cores)");
    println!();
    println!("OPTIONS:");
    println!("  --help, -h         Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("  # Patterns in >= 10 positive transactions and <= 1 negative, gap 2");
    println!("  {} mine positive.txt negative.txt 10 1 2", program);
    println!();
    println!("  # Read from S3 with 8 threads");
    println!("  {} mine s3://bucket/pos.txt s3://bucket/neg.txt 10 1 2 8", program);
    println!();
    println!("NOTE:");
    println!("  - One transaction per line, items are whitespace-separated integers");
    println!("  - Patterns are printed left to right in original item ids");
}
