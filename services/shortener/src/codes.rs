//! Short-code generation and URL normalization

use crate::errors::ShortenerError;
use rand::Rng;

/// Length of generated short codes.
pub const CODE_LENGTH: usize = 7;

/// Lowercase base-36 alphabet, matching the codes users see in the wild.
const CODE_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Draw a random short code. Uniqueness is the caller's concern — the
/// link book re-draws on collision.
pub fn random_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

/// Normalize a destination URL: scheme-less inputs get `https://`
/// prefixed; empty input is rejected.
pub fn normalize_url(raw: &str) -> Result<String, ShortenerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
        return Err(ShortenerError::InvalidUrl {
            url: raw.to_string(),
        });
    }
    if trimmed.starts_with("http") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("https://{}", trimmed))
    }
}
