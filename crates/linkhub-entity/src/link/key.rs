//! Link key alphabet.

/// The 62 symbols a link key may contain.
pub const KEY_ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Whether every character of `key` belongs to [`KEY_ALPHABET`].
pub fn is_key_charset(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_alphanumeric())
}
