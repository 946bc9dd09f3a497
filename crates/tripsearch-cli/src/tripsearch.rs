//! Tripcode search CLI
//!
//! Usage: tripsearch [OPTION] "SEARCH STRING"
//!
//! Example:
//!   tripsearch            print random tripcodes
//!   tripsearch Mod        case sensitive search
//!   tripsearch -i mod     case insensitive search
//!
//! Runs until interrupted. Set TRIPSEARCH_LOG=info for scheduler logs on stderr.

use log::{LevelFilter, warn};
use std::env;
use std::ffi::OsString;
use std::sync::Once;
use tripsearch_engine::{
    CancelToken, DesCrypt, MatchMode, OutputSink, Query, QueryError, RateTracker, SearchConfig,
    run_search,
};

const NAME: &str = "tripsearch";
const VERSION: &str = env!("CARGO_PKG_VERSION");
const DESCRIPTION: &str = "tripcode bruteforcer for futaba-type imageboards";

static LOGGER_INIT: Once = Once::new();

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logger() {
    let level = env::var("TRIPSEARCH_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);

    LOGGER_INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
    });
}

fn print_splash(workers: usize) {
    println!("{} {}", NAME, VERSION);
    println!("{}", DESCRIPTION);
    println!(
        "Using {} thread{}.",
        workers,
        if workers > 1 { "s" } else { "" }
    );
    println!("{}", "-".repeat(64));
}

fn print_usage() {
    println!("usage:");
    println!("\t{} [OPTION] \"SEARCH STRING\"", NAME);
    println!("help:");
    println!("\t(None)\t no query. {} will print random tripcodes to stdout.", NAME);
    println!("\t-i\t case agnostic search.");
    println!("\t-h\t display this help screen.");
    println!("note:");
    for note in QueryError::help_notes() {
        println!("\t{}", note);
    }
}

enum Command {
    Help,
    Search(Query),
}

/// Arguments are compared as raw bytes; a non-UTF-8 query fails validation
fn parse_args(args: &[OsString]) -> Result<Command, QueryError> {
    let arg = |i: usize| args.get(i).map(|a| a.as_encoded_bytes());

    let query = match arg(1) {
        None => Query::no_query(),
        Some(b"-h") => return Ok(Command::Help),
        Some(b"-i") => Query::from_bytes(arg(2), MatchMode::CaseInsensitive)?,
        Some(pattern) => Query::from_bytes(Some(pattern), MatchMode::CaseSensitive)?,
    };
    Ok(Command::Search(query))
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("[!] Error! -- {}", message);
    std::process::exit(1);
}

fn main() {
    init_logger();

    let args: Vec<OsString> = env::args_os().collect();
    let config = SearchConfig::new(Query::no_query());
    print_splash(config.workers);

    let query = match parse_args(&args) {
        Ok(Command::Search(query)) => query,
        Ok(Command::Help) => {
            print_usage();
            std::process::exit(1);
        }
        Err(e) => fail(e),
    };
    let config = SearchConfig { query, ..config };

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!("could not install Ctrl+C handler: {}", e);
    }

    let sink = OutputSink::stdout();
    let tracker = RateTracker::new();

    match run_search(&config, &DesCrypt, &sink, &tracker, &cancel) {
        Ok(summary) => {
            println!("{}", "-".repeat(64));
            println!(
                "Stopped after {} attempts ({} matches) in {:.2} seconds.",
                summary.attempts,
                summary.matches,
                summary.elapsed.as_secs_f64()
            );
        }
        Err(e) => fail(e),
    }
}
