//! Anti-forgery tokens
//!
//! A token is `hex(HMAC-SHA256(secret, "csrf:<user_id>"))`. It is stable for
//! a given identity, so the page shell can embed it and the middleware can
//! recompute it without server-side storage.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Secret used to derive per-identity CSRF tokens
#[derive(Clone)]
pub struct CsrfSecret {
    key: Vec<u8>,
}

impl fmt::Debug for CsrfSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsrfSecret")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl CsrfSecret {
    pub fn new(key: impl AsRef<[u8]>) -> Self {
        Self {
            key: key.as_ref().to_vec(),
        }
    }

    fn mac_for(&self, user_id: i64) -> HmacSha256 {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.key)
            .expect("HMAC can take key of any size");
        mac.update(format!("csrf:{user_id}").as_bytes());
        mac
    }

    /// Token the page shell embeds for `user_id`.
    pub fn token_for(&self, user_id: i64) -> String {
        hex::encode(self.mac_for(user_id).finalize().into_bytes())
    }

    /// Constant-time comparison of a submitted token against the expected one.
    pub fn verify(&self, user_id: i64, candidate: &str) -> bool {
        let Ok(bytes) = hex::decode(candidate.trim()) else {
            return false;
        };
        self.mac_for(user_id).verify_slice(&bytes).is_ok()
    }
}
