//! The salted hashing primitive and the target it is compared against.
//!
//! Hashing is an external collaborator: the engine only ever feeds it a
//! plaintext and a salt and compares the returned string. Everything the
//! search needs to know about the primitive fits in the [`HashOracle`]
//! trait, which is also the seam tests use to swap in cheap fakes.

use std::sync::Mutex;

use pwhash::unix;

use crate::error::Error;

/// One-way salted hashing primitive used to test candidate passwords.
///
/// Implementations must be deterministic: the same plaintext and salt always
/// produce the same hash string.
pub trait HashOracle: Sync {
    fn hash(&self, plaintext: &str, salt: &str) -> Result<String, Error>;
}

/// crypt(3)-compatible oracle backed by [`pwhash::unix`].
///
/// Understands the modular crypt salt formats (`$6$` SHA-512, `$5$` SHA-256,
/// `$1$` MD5, ...). The implementation is a pure function with no internal
/// state, so calls need no serialization and workers hash in parallel.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixCryptOracle;

impl HashOracle for UnixCryptOracle {
    fn hash(&self, plaintext: &str, salt: &str) -> Result<String, Error> {
        Ok(unix::crypt(plaintext, salt)?)
    }
}

/// Serializes every hash call behind a mutex.
///
/// For primitives that hold internal mutable state and are not safe to enter
/// from two threads at once — the classic example is a crypt(3) FFI binding
/// that returns a pointer into a static buffer. Candidate generation and
/// comparison still run in parallel; only the hash computation itself is
/// funneled through the lock, which makes hashing the throughput ceiling.
///
/// Non-reentrancy is modeled as `FnMut`: a primitive that needs `&mut self`
/// per call is exactly one the borrow checker refuses to share.
pub struct SerializedOracle<F> {
    primitive: Mutex<F>,
}

impl<F> SerializedOracle<F>
where
    F: FnMut(&str, &str) -> Result<String, Error> + Send,
{
    pub fn new(primitive: F) -> Self {
        Self { primitive: Mutex::new(primitive) }
    }
}

impl<F> HashOracle for SerializedOracle<F>
where
    F: FnMut(&str, &str) -> Result<String, Error> + Send,
{
    fn hash(&self, plaintext: &str, salt: &str) -> Result<String, Error> {
        let mut primitive = self.primitive.lock().expect("hash primitive lock poisoned");
        primitive(plaintext, salt)
    }
}

/// Target of a search: the combined `$id$salt$hash` string to match.
///
/// The salt prefix — everything through the final `'$'` — is located once at
/// parse time. It is invariant across the whole search, so workers never
/// re-derive it per candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetHash {
    full: String,
    salt_len: usize,
}

impl TargetHash {
    /// Parses a modular-crypt-format hash string.
    ///
    /// Returns [`Error::MalformedTargetHash`] when the string has no
    /// `$id$salt$` prefix or no hash field after it.
    pub fn parse(full: &str) -> Result<Self, Error> {
        let malformed = || Error::MalformedTargetHash { hash: full.to_string() };

        if !full.starts_with('$') {
            return Err(malformed());
        }
        let hash_start = full.rfind('$').map(|i| i + 1).ok_or_else(malformed)?;
        // need at least `$x$$` before the hash field, and a non-empty field
        if hash_start < 4 || hash_start >= full.len() {
            return Err(malformed());
        }

        Ok(Self { full: full.to_string(), salt_len: hash_start })
    }

    /// The `$id$salt$` prefix, fed to the oracle for every candidate.
    pub fn salt(&self) -> &str {
        &self.full[..self.salt_len]
    }

    /// The complete salt + hash string that candidate hashes must equal.
    pub fn full(&self) -> &str {
        &self.full
    }
}
