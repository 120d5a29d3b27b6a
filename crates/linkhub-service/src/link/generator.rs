//! Random link key generation.

use rand::RngCore;
use rand::rngs::OsRng;

use linkhub_core::error::{AppError, ErrorKind};
use linkhub_core::result::AppResult;
use linkhub_entity::link::KEY_ALPHABET;

/// Largest multiple of the alphabet size that fits in a byte. Bytes at or
/// above it are discarded so every symbol is equally likely.
const REJECTION_BOUND: u8 = (256 / KEY_ALPHABET.len() * KEY_ALPHABET.len()) as u8;

/// Produces candidate link keys. Knows nothing about the store.
pub trait KeyGenerator: Send + Sync {
    /// Return exactly `length` characters drawn from [`KEY_ALPHABET`].
    fn generate(&self, length: usize) -> AppResult<String>;
}

/// Key generator backed by the operating system CSPRNG.
///
/// An entropy failure is reported as `RandomSource`; there is no fallback
/// to a weaker generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureKeyGenerator;

impl SecureKeyGenerator {
    /// Create a new generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate from an arbitrary byte source.
    fn generate_from<R: RngCore>(rng: &mut R, length: usize) -> AppResult<String> {
        let mut key = String::with_capacity(length);
        let mut buf = [0u8; 32];

        while key.len() < length {
            rng.try_fill_bytes(&mut buf).map_err(|e| {
                AppError::with_source(ErrorKind::RandomSource, "Secure random source failed", e)
            })?;
            for &byte in buf.iter().filter(|b| **b < REJECTION_BOUND) {
                key.push(KEY_ALPHABET[byte as usize % KEY_ALPHABET.len()] as char);
                if key.len() == length {
                    break;
                }
            }
        }

        Ok(key)
    }
}

impl KeyGenerator for SecureKeyGenerator {
    fn generate(&self, length: usize) -> AppResult<String> {
        Self::generate_from(&mut OsRng, length)
    }
}
