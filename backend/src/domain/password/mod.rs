//! Password hashing and tolerant verification.
//!
//! New hashes are always written in the canonical form
//! `pbkdf2_<algo>$<iterations>$<salt-b64>$<derived-key-b64>`. Verification
//! additionally accepts the historical encodings listed in [`FORMATS`] and
//! stored values holding several encodings concatenated together.
//!
//! Verification never returns an error: anything that cannot be parsed is a
//! non-match.
//!
//! # Examples
//! ```
//! use symptom_checker::domain::password::{PasswordHasher, Pbkdf2Params, verify_password};
//!
//! let hasher = PasswordHasher::new(Pbkdf2Params::default().with_iterations(1_000).unwrap());
//! let stored = hasher.hash("correct horse").unwrap();
//! assert!(verify_password("correct horse", &stored));
//! assert!(!verify_password("wrong horse", &stored));
//! ```

mod candidates;
mod digest;
mod encoding;
mod format;

use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

pub use digest::Pbkdf2Digest;
pub use format::{
    BcryptFormat, CanonicalPbkdf2, FORMATS, HashFormat, LegacyPbkdf2, MAX_DERIVED_KEY_LEN,
    MAX_ITERATIONS, ParsedHash, Pbkdf2Hash, UnlabeledPbkdf2,
};

use candidates::split_candidates;
use encoding::encode_field;

/// Default iteration count for new hashes.
pub const DEFAULT_ITERATIONS: u32 = 200_000;
/// Default salt length in bytes.
pub const DEFAULT_SALT_LEN: usize = 16;
/// Default derived-key length in bytes.
pub const DEFAULT_KEY_LEN: usize = 32;

/// Errors raised while producing a new hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    #[error("password cannot be empty")]
    EmptyPassword,
    #[error("iterations must be between 1 and {max}")]
    IterationsOutOfRange { max: u32 },
    #[error("derived key length must be between 1 and {max} bytes")]
    KeyLengthOutOfRange { max: usize },
}

/// Parameters for newly written hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pbkdf2Params {
    digest: Pbkdf2Digest,
    iterations: u32,
    salt_len: usize,
    key_len: usize,
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self {
            digest: Pbkdf2Digest::Sha256,
            iterations: DEFAULT_ITERATIONS,
            salt_len: DEFAULT_SALT_LEN,
            key_len: DEFAULT_KEY_LEN,
        }
    }
}

impl Pbkdf2Params {
    /// Override the iteration count.
    pub fn with_iterations(mut self, iterations: u32) -> Result<Self, PasswordHashError> {
        if iterations == 0 || iterations > MAX_ITERATIONS {
            return Err(PasswordHashError::IterationsOutOfRange {
                max: MAX_ITERATIONS,
            });
        }
        self.iterations = iterations;
        Ok(self)
    }

    /// Override the digest.
    #[must_use]
    pub fn with_digest(mut self, digest: Pbkdf2Digest) -> Self {
        self.digest = digest;
        self
    }

    /// Override the derived-key length.
    pub fn with_key_len(mut self, key_len: usize) -> Result<Self, PasswordHashError> {
        if key_len == 0 || key_len > MAX_DERIVED_KEY_LEN {
            return Err(PasswordHashError::KeyLengthOutOfRange {
                max: MAX_DERIVED_KEY_LEN,
            });
        }
        self.key_len = key_len;
        Ok(self)
    }

    pub fn digest(&self) -> Pbkdf2Digest {
        self.digest
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

/// Writer of canonical hashes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordHasher {
    params: Pbkdf2Params,
}

impl PasswordHasher {
    pub fn new(params: Pbkdf2Params) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Pbkdf2Params {
        &self.params
    }

    /// Hash `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let mut salt = vec![0_u8; self.params.salt_len];
        OsRng.fill_bytes(&mut salt);
        self.hash_with_salt(password, &salt)
    }

    /// Hash `password` with an explicit salt.
    pub fn hash_with_salt(&self, password: &str, salt: &[u8]) -> Result<String, PasswordHashError> {
        if password.is_empty() {
            return Err(PasswordHashError::EmptyPassword);
        }
        let mut derived = Zeroizing::new(vec![0_u8; self.params.key_len]);
        self.params
            .digest
            .derive(password.as_bytes(), salt, self.params.iterations, &mut derived);
        Ok(format!(
            "pbkdf2_{}${}${}${}",
            self.params.digest.tag(),
            self.params.iterations,
            encode_field(salt),
            encode_field(&derived),
        ))
    }

    /// Whether `stored` should be rewritten in the current canonical form.
    ///
    /// True unless `stored` is exactly one canonical encoding with this
    /// hasher's digest, iteration count and key length.
    pub fn needs_rehash(&self, stored: &str) -> bool {
        let candidates = split_candidates(stored);
        let [single] = candidates.as_slice() else {
            return true;
        };
        match CanonicalPbkdf2.parse(single) {
            Some(ParsedHash::Pbkdf2(hash)) => {
                hash.digest != self.params.digest
                    || hash.iterations != self.params.iterations
                    || hash.derived_key.len() != self.params.key_len
            }
            _ => true,
        }
    }
}

/// Return the name of the format that verified `password`, if any.
///
/// Candidates are tried in stored order and, within a candidate, formats in
/// [`FORMATS`] order; the first verifying pair wins.
pub fn matching_format(password: &str, stored: &str) -> Option<&'static str> {
    if password.is_empty() || stored.trim().is_empty() {
        return None;
    }
    split_candidates(stored).into_iter().find_map(|candidate| {
        FORMATS.iter().find_map(|format| {
            format
                .parse(candidate)
                .filter(|parsed| parsed.verify(password))
                .map(|_| format.name())
        })
    })
}

/// Check `password` against a stored hash in any recognised encoding.
pub fn verify_password(password: &str, stored: &str) -> bool {
    matching_format(password, stored).is_some()
}
