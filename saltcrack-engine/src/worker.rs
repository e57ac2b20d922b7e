//! Worker loop and the state shared between workers.

use std::ops::Range;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::Error;
use crate::keyspace::Keyspace;
use crate::oracle::{HashOracle, TargetHash};

/// Terminal state of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// A candidate from this worker's partition matched and won the
    /// found-slot.
    Found,
    /// The partition was fully explored without a match.
    Exhausted,
    /// The stop flag was raised elsewhere before the partition was exhausted.
    Stopped,
}

/// Attempt counter and found-slot, mutated together.
#[derive(Debug, Default)]
struct Progress {
    attempts: u64,
    found: Option<String>,
}

/// State shared by the coordinator and every worker for one search.
///
/// The attempt counter and the found-slot live behind a single mutex and are
/// only ever mutated together, through [`record_attempt`]: checking the slot
/// for "unset" and writing it under the same lock is what makes the write
/// at-most-once across the whole search.
///
/// The stop flag is a plain atomic read outside the lock. A stale "not
/// stopped" read only makes a worker hash one more candidate; it can never
/// corrupt the counter or the slot.
///
/// [`record_attempt`]: SharedSearchState::record_attempt
#[derive(Debug, Default)]
pub struct SharedSearchState {
    progress: Mutex<Progress>,
    stop: AtomicBool,
}

impl SharedSearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of candidates hashed and compared so far. Monotonic.
    pub fn attempts(&self) -> u64 {
        self.lock_progress().attempts
    }

    /// The winning plaintext, once a worker has claimed the found-slot.
    pub fn found(&self) -> Option<String> {
        self.lock_progress().found.clone()
    }

    pub fn is_stopped(&self) -> bool {
        // Relaxed: the flag only gates early exit, and the found-slot itself
        // is published through the mutex.
        self.stop.load(Ordering::Relaxed)
    }

    /// Raises the stop flag. One-way: there is no reset.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Records one hashed candidate under the shared critical section.
    ///
    /// Increments the attempt counter and, when `is_match` holds and no
    /// earlier match claimed the slot, stores the plaintext and raises the
    /// stop flag. Returns whether this call won the slot.
    ///
    /// When several distinct candidates hash to the target, whichever worker
    /// takes the lock first wins; which one that is varies across runs and
    /// thread counts, and the engine only promises the slot is written once.
    pub fn record_attempt(&self, plaintext: &str, is_match: bool) -> bool {
        let mut progress = self.lock_progress();
        progress.attempts += 1;

        if is_match && progress.found.is_none() {
            progress.found = Some(plaintext.to_string());
            self.request_stop();
            return true;
        }
        false
    }

    fn lock_progress(&self) -> std::sync::MutexGuard<'_, Progress> {
        // a poisoned lock means a worker panicked mid-search; propagate
        self.progress.lock().expect("search state lock poisoned")
    }
}

/// Exhausts one keyspace partition against the target hash.
///
/// Walks the partition in increasing index order. Each iteration polls the
/// stop flag, derives the candidate, hashes it with the target's salt, and
/// records the comparison under the shared critical section. An oracle
/// failure raises the stop flag before the error is returned, so no worker
/// keeps searching past a broken primitive.
pub(crate) fn run_worker<O: HashOracle>(
    keyspace: &Keyspace,
    range: Range<u32>,
    oracle: &O,
    target: &TargetHash,
    state: &SharedSearchState,
) -> Result<WorkerOutcome, Error> {
    for index in range {
        if state.is_stopped() {
            return Ok(WorkerOutcome::Stopped);
        }

        let candidate = keyspace.encode(index);
        let hashed = match oracle.hash(&candidate, target.salt()) {
            Ok(hashed) => hashed,
            Err(e) => {
                state.request_stop();
                return Err(e);
            }
        };

        if state.record_attempt(&candidate, hashed == target.full()) {
            return Ok(WorkerOutcome::Found);
        }
        // A losing match (slot already claimed) falls through: the raised
        // stop flag ends the loop on the next iteration.
    }

    Ok(WorkerOutcome::Exhausted)
}
