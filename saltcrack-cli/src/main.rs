use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::{ArgGroup, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use saltcrack_engine::{Cracker, HashOracle, Outcome, SharedSearchState, UnixCryptOracle};

mod error;

use error::Error;

#[derive(Parser, Debug)]
#[command(name = "saltcrack")]
#[command(about = "Brute-force a salted crypt(3) hash over the AA00-ZZ99 password space")]
#[command(group(ArgGroup::new("target").required(true)))]
struct Args {
    /// Salted hash to crack (full $6$salt$hash string)
    #[arg(long, group = "target")]
    hash: Option<String>,

    /// Hash this password first, then crack the result
    #[arg(long, group = "target")]
    password: Option<String>,

    /// Salt applied when --password is used
    #[arg(long, default_value = "$6$AS$")]
    salt: String,

    /// Number of worker threads (1-26)
    #[arg(short = 'j', long, default_value = "4")]
    threads: usize,

    /// Disable progress bar
    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    let oracle = UnixCryptOracle;
    let cracker = Cracker::new(oracle);

    let target = match (&args.hash, &args.password) {
        (Some(hash), None) => hash.clone(),
        (None, Some(password)) => {
            if cracker.keyspace().decode(password).is_none() {
                return Err(Error::PasswordOutsideKeyspace { password: password.clone() });
            }
            let hashed = oracle.hash(password, &args.salt)?;
            println!("Encrypted password: {hashed}");
            hashed
        }
        _ => unreachable!("clap group guarantees exactly one of --hash/--password"),
    };

    let total = cracker.keyspace().len() as u64;
    println!("Searching {total} candidates with {} threads...", args.threads);

    let state = Arc::new(SharedSearchState::new());

    // Set up progress bar
    let progress_bar = if !args.no_progress {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    // Spawn progress updater thread, polling the shared attempt counter
    let updater = progress_bar.clone().map(|pb| {
        let state = Arc::clone(&state);
        thread::spawn(move || {
            while !state.is_stopped() {
                thread::sleep(Duration::from_millis(100));
                pb.set_position(state.attempts());
            }
        })
    });

    let result = cracker.search_with_state(&target, args.threads, &state);

    // The search raises the stop flag once all workers are terminal; raise it
    // here too so the updater winds down on validation errors.
    state.request_stop();
    if let Some(handle) = updater {
        let _ = handle.join();
    }
    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    match result? {
        Outcome::Match { plaintext, attempts } => {
            println!("Password found: {plaintext}");
            println!("{attempts} solutions explored");
        }
        Outcome::NoMatch { attempts } => {
            println!("No match in keyspace");
            println!("{attempts} solutions explored");
        }
    }

    Ok(())
}
