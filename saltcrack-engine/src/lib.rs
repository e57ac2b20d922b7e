//! Exhaustive parallel search for a plaintext whose salted hash matches a
//! given target hash.
//!
//! **This is not a general-purpose password cracker.** It covers one small,
//! fixed password format — two uppercase letters followed by a zero-padded
//! number, `AA00` through `ZZ99` in the canonical configuration — and finds
//! the matching plaintext by brute force, or proves there is none.
//!
//! # How the search works
//!
//! Every candidate in the format has a dense integer index. For the canonical
//! 26-letter, two-digit format there are 26 × 26 × 100 = 67,600 candidates,
//! and index `i` maps to:
//!
//! - first letter: `'A' + i / 2600`
//! - second letter: `'A' + (i / 100) % 26`
//! - number: `i % 100`, zero-padded
//!
//! The index range is split into one contiguous partition per worker thread.
//! Each worker walks its partition in order, hashes the candidate with the
//! salt extracted from the target, and compares against the full target
//! string. The first match wins a shared found-slot and raises a stop flag
//! that every worker polls between candidates, so the rest of the keyspace is
//! abandoned as soon as an answer exists.
//!
//! # Why exhaustive enumeration?
//!
//! The keyspace is small enough that walking all of it is cheap next to the
//! hash computation itself, and indexing makes the division of labor trivial:
//! partitions are gapless and disjoint by construction, so the attempt
//! counter reaching the keyspace size is proof that no candidate was skipped.
//!
//! The hashing primitive is an external collaborator behind the
//! [`HashOracle`] trait. The default [`UnixCryptOracle`] speaks crypt(3)'s
//! `$6$` (SHA-512) modular format via the `pwhash` crate.
//!
//! # Usage
//!
//! ```no_run
//! use saltcrack_engine::{Cracker, Outcome, UnixCryptOracle};
//!
//! let cracker = Cracker::new(UnixCryptOracle);
//! match cracker.search("$6$AS$...", 4)? {
//!     Outcome::Match { plaintext, attempts } => {
//!         println!("found {plaintext} after {attempts} attempts");
//!     }
//!     Outcome::NoMatch { attempts } => {
//!         println!("no match in {attempts} candidates");
//!     }
//! }
//! # Ok::<(), saltcrack_engine::Error>(())
//! ```

pub mod error;
pub mod keyspace;
pub mod oracle;
pub mod partition;
pub mod search;
pub mod worker;

pub use error::Error;
pub use keyspace::Keyspace;
pub use oracle::{HashOracle, SerializedOracle, TargetHash, UnixCryptOracle};
pub use partition::partition;
pub use search::{Cracker, MAX_THREADS, Outcome};
pub use worker::{SharedSearchState, WorkerOutcome};
