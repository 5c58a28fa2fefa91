//! Continuation tokens for paged listings.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

const TOKEN_PREFIX: &str = "off:";

/// Position inside a listing.
///
/// Rendered to callers as an opaque URL-safe token; a saved token can be
/// handed back later to resume from the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListCursor {
    /// Number of entries already consumed.
    pub offset: u64,
}

impl ListCursor {
    /// Cursor at the given offset.
    pub fn at(offset: u64) -> Self {
        Self { offset }
    }

    /// Cursor following a page of `page_len` entries read at this position.
    pub fn advance(self, page_len: usize) -> Self {
        Self {
            offset: self.offset + page_len as u64,
        }
    }

    /// Encode as an opaque token.
    pub fn to_token(&self) -> String {
        URL_SAFE_NO_PAD.encode(format!("{TOKEN_PREFIX}{}", self.offset))
    }

    /// Decode a token produced by [`ListCursor::to_token`].
    pub fn from_token(token: &str) -> AppResult<Self> {
        let raw = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| AppError::validation("Malformed continuation token"))?;
        let text = String::from_utf8(raw)
            .map_err(|_| AppError::validation("Malformed continuation token"))?;
        let offset = text
            .strip_prefix(TOKEN_PREFIX)
            .and_then(|n| n.parse::<u64>().ok())
            .ok_or_else(|| AppError::validation("Malformed continuation token"))?;
        Ok(Self { offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_restores_position() {
        let cursor = ListCursor::default().advance(100).advance(100);
        let restored = ListCursor::from_token(&cursor.to_token()).unwrap();
        assert_eq!(restored.offset, 200);
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(ListCursor::from_token("not a token!").is_err());
        let foreign = URL_SAFE_NO_PAD.encode("page=3");
        assert!(ListCursor::from_token(&foreign).is_err());
    }
}
