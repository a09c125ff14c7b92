//! Authorization token generation

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use rand::RngCore;
use rand::rngs::OsRng;

/// Random bytes behind a token; encodes to exactly 32 base64 characters.
const TOKEN_BYTES: usize = 24;

/// Generate a random URL-safe bearer token.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_32_url_safe_chars() {
        let token = generate_token();
        assert_eq!(token.len(), 32);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn tokens_are_not_repeated() {
        assert_ne!(generate_token(), generate_token());
    }
}
