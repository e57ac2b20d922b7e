//! Coordinator: partitions the keyspace, runs the workers, reports the
//! outcome.

use std::panic;
use std::thread;

use crate::error::Error;
use crate::keyspace::Keyspace;
use crate::oracle::{HashOracle, TargetHash};
use crate::partition::partition;
use crate::worker::{SharedSearchState, run_worker};

/// Upper bound on worker threads. Bounded so that even a pathological
/// one-first-letter-per-thread division of the canonical keyspace remains
/// meaningful.
pub const MAX_THREADS: usize = 26;

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A candidate hashed to the target.
    Match { plaintext: String, attempts: u64 },
    /// The keyspace was exhausted without a match; `attempts` equals the
    /// keyspace size.
    NoMatch { attempts: u64 },
}

impl Outcome {
    /// Total candidates hashed and compared, across all workers.
    pub fn attempts(&self) -> u64 {
        match self {
            Outcome::Match { attempts, .. } | Outcome::NoMatch { attempts } => *attempts,
        }
    }
}

/// Brute-force searcher over one keyspace with one hashing primitive.
#[derive(Debug)]
pub struct Cracker<O> {
    keyspace: Keyspace,
    oracle: O,
}

impl<O: HashOracle> Cracker<O> {
    /// Creates a cracker over the canonical `AA00`..`ZZ99` keyspace.
    pub fn new(oracle: O) -> Self {
        Self::with_keyspace(oracle, Keyspace::CANONICAL)
    }

    pub fn with_keyspace(oracle: O, keyspace: Keyspace) -> Self {
        Self { keyspace, oracle }
    }

    pub fn keyspace(&self) -> &Keyspace {
        &self.keyspace
    }

    /// Searches the keyspace for a plaintext hashing to `target_hash`.
    ///
    /// Spawns `thread_count` workers (1 to [`MAX_THREADS`]), one per
    /// contiguous keyspace partition, and blocks until every worker reaches a
    /// terminal state.
    pub fn search(&self, target_hash: &str, thread_count: usize) -> Result<Outcome, Error> {
        let state = SharedSearchState::new();
        self.search_with_state(target_hash, thread_count, &state)
    }

    /// Like [`search`], but against caller-supplied shared state.
    ///
    /// Lets the caller watch the attempt counter from another thread while
    /// the search runs — a progress bar, a wall-clock timeout driving
    /// [`SharedSearchState::request_stop`], and the like. The state must be
    /// freshly created for each search.
    ///
    /// [`search`]: Cracker::search
    pub fn search_with_state(
        &self,
        target_hash: &str,
        thread_count: usize,
        state: &SharedSearchState,
    ) -> Result<Outcome, Error> {
        if thread_count < 1 || thread_count > MAX_THREADS {
            return Err(Error::InvalidThreadCount { got: thread_count });
        }
        let target = TargetHash::parse(target_hash)?;
        let total = self.keyspace.len();

        let worker_results = thread::scope(|s| {
            let handles: Vec<_> = (0..thread_count)
                .map(|thread_index| {
                    let range = partition(total, thread_count, thread_index);
                    let target = &target;
                    s.spawn(move || run_worker(&self.keyspace, range, &self.oracle, target, state))
                })
                .collect();

            // Join every worker before surfacing anything. A panic payload is
            // held back until the remaining workers have wound down, then
            // re-raised: an invariant violation aborts the whole search.
            let mut results = Vec::with_capacity(handles.len());
            let mut panicked = None;
            for handle in handles {
                match handle.join() {
                    Ok(result) => results.push(result),
                    Err(payload) => {
                        state.request_stop();
                        panicked.get_or_insert(payload);
                    }
                }
            }
            if let Some(payload) = panicked {
                panic::resume_unwind(payload);
            }
            results
        });

        // All workers are terminal; raise the flag so external observers of
        // the shared state see the search as finished.
        state.request_stop();

        let mut first_error: Option<Error> = None;
        for result in worker_results {
            if let Err(e) = result {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        if let Some(e) = first_error {
            return Err(e);
        }

        let attempts = state.attempts();
        match state.found() {
            Some(plaintext) => Ok(Outcome::Match { plaintext, attempts }),
            None => Ok(Outcome::NoMatch { attempts }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::UnixCryptOracle;

    /// Cheap stand-in for the crypt primitive: hash = salt + plaintext.
    /// Injective over the keyspace, so exactly one candidate matches a
    /// well-formed target.
    struct EchoOracle;

    impl HashOracle for EchoOracle {
        fn hash(&self, plaintext: &str, salt: &str) -> Result<String, Error> {
            Ok(format!("{salt}{plaintext}"))
        }
    }

    #[test]
    fn test_finds_the_planted_password() {
        let cracker = Cracker::new(EchoOracle);
        let outcome = cracker.search("$6$AS$AB07", 4).unwrap();

        match outcome {
            Outcome::Match { plaintext, attempts } => {
                assert_eq!(plaintext, "AB07");
                assert!((1..=67_600).contains(&attempts));
            }
            Outcome::NoMatch { .. } => panic!("planted password was not found"),
        }
    }

    #[test]
    fn test_same_plaintext_for_every_thread_count() {
        let cracker = Cracker::new(EchoOracle);
        for thread_count in [1, 2, 13, 26] {
            let outcome = cracker.search("$6$AS$QX33", thread_count).unwrap();
            match outcome {
                Outcome::Match { plaintext, .. } => assert_eq!(
                    plaintext, "QX33",
                    "wrong plaintext with {thread_count} threads"
                ),
                Outcome::NoMatch { .. } => {
                    panic!("no match with {thread_count} threads")
                }
            }
        }
    }

    #[test]
    fn test_exhaustion_visits_every_candidate() {
        let cracker = Cracker::new(EchoOracle);
        // the echo hash of any 4-char candidate can never equal this
        // 5-char field, so the whole keyspace must be explored
        for thread_count in [1, 3, 26] {
            let outcome = cracker.search("$6$AS$NOPE!", thread_count).unwrap();
            assert_eq!(
                outcome,
                Outcome::NoMatch { attempts: 67_600 },
                "exhaustion miscounted with {thread_count} threads"
            );
        }
    }

    #[test]
    fn test_thread_count_bounds_are_enforced() {
        let cracker = Cracker::new(EchoOracle);
        for bad in [0, 27, 100] {
            let result = cracker.search("$6$AS$AB07", bad);
            assert!(
                matches!(result, Err(Error::InvalidThreadCount { got }) if got == bad),
                "thread count {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_malformed_target_is_rejected_before_searching() {
        let cracker = Cracker::new(EchoOracle);
        let state = SharedSearchState::new();
        let result = cracker.search_with_state("not-a-crypt-hash", 4, &state);

        assert!(matches!(result, Err(Error::MalformedTargetHash { .. })));
        assert_eq!(state.attempts(), 0, "no work before validation");
    }

    #[test]
    fn test_colliding_candidates_yield_exactly_one_winner() {
        // Every candidate "hashes" to the same string: the found-slot must
        // still be written exactly once, with some valid keyspace member.
        struct ConstOracle;

        impl HashOracle for ConstOracle {
            fn hash(&self, _plaintext: &str, salt: &str) -> Result<String, Error> {
                Ok(format!("{salt}COLLIDE"))
            }
        }

        let cracker = Cracker::new(ConstOracle);
        let outcome = cracker.search("$6$AS$COLLIDE", 26).unwrap();

        match outcome {
            Outcome::Match { plaintext, attempts } => {
                assert!(cracker.keyspace().decode(&plaintext).is_some());
                assert!(attempts >= 1);
            }
            Outcome::NoMatch { .. } => panic!("collision target was not matched"),
        }
    }

    #[test]
    fn test_oracle_error_aborts_the_search() {
        struct FailingOracle;

        impl HashOracle for FailingOracle {
            fn hash(&self, _plaintext: &str, _salt: &str) -> Result<String, Error> {
                Err(Error::Hash(pwhash::error::Error::InvalidHashString))
            }
        }

        let cracker = Cracker::new(FailingOracle);
        let result = cracker.search("$6$AS$AB07", 8);
        assert!(matches!(result, Err(Error::Hash(_))));
    }

    #[test]
    fn test_state_is_marked_stopped_after_completion() {
        let cracker = Cracker::new(EchoOracle);
        let state = SharedSearchState::new();
        let outcome = cracker.search_with_state("$6$AS$NOPE!", 2, &state).unwrap();

        assert!(state.is_stopped());
        assert_eq!(state.attempts(), outcome.attempts());
    }

    #[test]
    fn test_real_crypt_round_trip_on_reduced_keyspace() {
        // 3 letters x 10 digits = 90 candidates; cheap enough to run the
        // actual sha512-crypt primitive end to end.
        let keyspace = Keyspace::new(3, 10);
        let oracle = UnixCryptOracle;
        let target = oracle.hash("CB4", "$6$AS$").unwrap();

        let cracker = Cracker::with_keyspace(oracle, keyspace);
        let outcome = cracker.search(&target, 4).unwrap();

        match outcome {
            Outcome::Match { plaintext, attempts } => {
                assert_eq!(plaintext, "CB4");
                assert!((1..=90).contains(&attempts));
            }
            Outcome::NoMatch { .. } => panic!("crypt target was not found"),
        }
    }
}
