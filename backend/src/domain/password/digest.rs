//! PBKDF2 digest selection keyed by the textual algorithm tag.

use md5::Md5;
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

/// HMAC digest used inside PBKDF2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pbkdf2Digest {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

impl Pbkdf2Digest {
    /// Resolve an algorithm tag such as `sha256` or `sha3-256`
    /// (case-insensitive, `-` and `_` are interchangeable).
    ///
    /// Unknown tags return `None` so callers treat them as a non-match.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "md5" => Some(Self::Md5),
            "sha1" => Some(Self::Sha1),
            "sha224" => Some(Self::Sha224),
            "sha256" => Some(Self::Sha256),
            "sha384" => Some(Self::Sha384),
            "sha512" => Some(Self::Sha512),
            "sha512_224" => Some(Self::Sha512_224),
            "sha512_256" => Some(Self::Sha512_256),
            "sha3_224" => Some(Self::Sha3_224),
            "sha3_256" => Some(Self::Sha3_256),
            "sha3_384" => Some(Self::Sha3_384),
            "sha3_512" => Some(Self::Sha3_512),
            _ => None,
        }
    }

    /// Canonical lowercase tag written by the encoder.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Sha512_224 => "sha512_224",
            Self::Sha512_256 => "sha512_256",
            Self::Sha3_224 => "sha3_224",
            Self::Sha3_256 => "sha3_256",
            Self::Sha3_384 => "sha3_384",
            Self::Sha3_512 => "sha3_512",
        }
    }

    /// Fill `out` with the PBKDF2-HMAC derivation of `password`.
    pub fn derive(self, password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) {
        match self {
            Self::Md5 => pbkdf2_hmac::<Md5>(password, salt, rounds, out),
            Self::Sha1 => pbkdf2_hmac::<Sha1>(password, salt, rounds, out),
            Self::Sha224 => pbkdf2_hmac::<Sha224>(password, salt, rounds, out),
            Self::Sha256 => pbkdf2_hmac::<Sha256>(password, salt, rounds, out),
            Self::Sha384 => pbkdf2_hmac::<Sha384>(password, salt, rounds, out),
            Self::Sha512 => pbkdf2_hmac::<Sha512>(password, salt, rounds, out),
            Self::Sha512_224 => pbkdf2_hmac::<Sha512_224>(password, salt, rounds, out),
            Self::Sha512_256 => pbkdf2_hmac::<Sha512_256>(password, salt, rounds, out),
            Self::Sha3_224 => pbkdf2_hmac::<Sha3_224>(password, salt, rounds, out),
            Self::Sha3_256 => pbkdf2_hmac::<Sha3_256>(password, salt, rounds, out),
            Self::Sha3_384 => pbkdf2_hmac::<Sha3_384>(password, salt, rounds, out),
            Self::Sha3_512 => pbkdf2_hmac::<Sha3_512>(password, salt, rounds, out),
        }
    }
}
