//! Recognised stored-hash encodings.
//!
//! Each encoding is a [`HashFormat`] matcher that either recognises a
//! candidate string and extracts its parameters, or declines it. The matchers
//! run in the order of [`FORMATS`]; a matcher never fails loudly.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::digest::Pbkdf2Digest;
use super::encoding::decode_field;

/// Upper bound on accepted iteration counts.
pub const MAX_ITERATIONS: u32 = 10_000_000;
/// Upper bound on accepted derived-key length in bytes.
pub const MAX_DERIVED_KEY_LEN: usize = 1024;

const CANONICAL_PREFIX: &str = "pbkdf2_";
const LEGACY_PREFIX: &str = "pbkdf2$";
const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Parameters recovered from a PBKDF2 encoding.
#[derive(Clone, PartialEq, Eq)]
pub struct Pbkdf2Hash {
    pub digest: Pbkdf2Digest,
    pub iterations: u32,
    pub salt: Vec<u8>,
    pub derived_key: Vec<u8>,
}

impl Pbkdf2Hash {
    /// Parse the four textual PBKDF2 fields, rejecting anything out of range.
    pub fn from_fields(algorithm: &str, iterations: &str, salt: &str, key: &str) -> Option<Self> {
        let digest = Pbkdf2Digest::from_tag(algorithm)?;
        let iterations = iterations.trim().parse::<u32>().ok()?;
        if iterations == 0 || iterations > MAX_ITERATIONS {
            return None;
        }
        let salt = decode_field(salt)?;
        let derived_key = decode_field(key)?;
        if derived_key.is_empty() || derived_key.len() > MAX_DERIVED_KEY_LEN {
            return None;
        }
        Some(Self {
            digest,
            iterations,
            salt,
            derived_key,
        })
    }

    /// Recompute the derivation and compare in constant time.
    pub fn verify(&self, password: &str) -> bool {
        let mut derived = Zeroizing::new(vec![0_u8; self.derived_key.len()]);
        self.digest
            .derive(password.as_bytes(), &self.salt, self.iterations, &mut derived);
        bool::from(derived.as_slice().ct_eq(self.derived_key.as_slice()))
    }
}

impl fmt::Debug for Pbkdf2Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pbkdf2Hash")
            .field("digest", &self.digest)
            .field("iterations", &self.iterations)
            .field("salt_len", &self.salt.len())
            .field("derived_key_len", &self.derived_key.len())
            .finish()
    }
}

/// A candidate recognised by one of the matchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedHash<'a> {
    Pbkdf2(Pbkdf2Hash),
    Bcrypt(&'a str),
}

impl ParsedHash<'_> {
    /// Check `password` against the parsed encoding. Errors count as a miss.
    pub fn verify(&self, password: &str) -> bool {
        match self {
            Self::Pbkdf2(hash) => hash.verify(password),
            Self::Bcrypt(encoded) => bcrypt::verify(password, encoded).unwrap_or(false),
        }
    }
}

/// One stored-hash encoding.
pub trait HashFormat: Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Recognise `candidate`, returning its parameters or `None`.
    fn parse<'a>(&self, candidate: &'a str) -> Option<ParsedHash<'a>>;
}

/// `pbkdf2_<algo>$<iterations>$<salt>$<key>`; trailing fields are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalPbkdf2;

impl HashFormat for CanonicalPbkdf2 {
    fn name(&self) -> &'static str {
        "pbkdf2_canonical"
    }

    fn parse<'a>(&self, candidate: &'a str) -> Option<ParsedHash<'a>> {
        let rest = candidate.strip_prefix(CANONICAL_PREFIX)?;
        let mut fields = rest.split('$');
        let (algorithm, iterations, salt, key) =
            (fields.next()?, fields.next()?, fields.next()?, fields.next()?);
        Pbkdf2Hash::from_fields(algorithm, iterations, salt, key).map(ParsedHash::Pbkdf2)
    }
}

/// `pbkdf2$<algo>$<iterations>$<salt>$<key>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyPbkdf2;

impl HashFormat for LegacyPbkdf2 {
    fn name(&self) -> &'static str {
        "pbkdf2_legacy"
    }

    fn parse<'a>(&self, candidate: &'a str) -> Option<ParsedHash<'a>> {
        let rest = candidate.strip_prefix(LEGACY_PREFIX)?;
        let mut fields = rest.split('$');
        let (algorithm, iterations, salt, key) =
            (fields.next()?, fields.next()?, fields.next()?, fields.next()?);
        Pbkdf2Hash::from_fields(algorithm, iterations, salt, key).map(ParsedHash::Pbkdf2)
    }
}

/// `<algo>$<iterations>$<salt>$<key>` without any prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnlabeledPbkdf2;

impl HashFormat for UnlabeledPbkdf2 {
    fn name(&self) -> &'static str {
        "pbkdf2_unlabeled"
    }

    fn parse<'a>(&self, candidate: &'a str) -> Option<ParsedHash<'a>> {
        let mut fields = candidate.split('$');
        let (algorithm, iterations, salt, key) =
            (fields.next()?, fields.next()?, fields.next()?, fields.next()?);
        Pbkdf2Hash::from_fields(algorithm, iterations, salt, key).map(ParsedHash::Pbkdf2)
    }
}

/// Modular-crypt bcrypt strings (`$2a$`, `$2b$`, `$2y$`).
#[derive(Debug, Clone, Copy, Default)]
pub struct BcryptFormat;

impl HashFormat for BcryptFormat {
    fn name(&self) -> &'static str {
        "bcrypt"
    }

    fn parse<'a>(&self, candidate: &'a str) -> Option<ParsedHash<'a>> {
        BCRYPT_PREFIXES
            .iter()
            .any(|prefix| candidate.starts_with(prefix))
            .then_some(ParsedHash::Bcrypt(candidate))
    }
}

/// Matchers in the order they are attempted against every candidate.
pub static FORMATS: [&dyn HashFormat; 4] = [
    &CanonicalPbkdf2,
    &LegacyPbkdf2,
    &UnlabeledPbkdf2,
    &BcryptFormat,
];
