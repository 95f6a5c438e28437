//! Signed identity tokens
//!
//! Token layout: `base64url(user_id[16] || HMAC-SHA256(secret, user_id)[32])`.
//! Tokens are minted by the account service sharing the same secret; this
//! side only needs to verify them.

use uuid::Uuid;

use crate::crypto::{from_base64_url, hmac_sha256, to_base64_url, verify_hmac_sha256};

const ID_LEN: usize = 16;
const TAG_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityTokenError {
    #[error("Identity token is not valid base64url")]
    Encoding,
    #[error("Identity token has wrong length: {0} bytes")]
    Length(usize),
    #[error("Identity token signature mismatch")]
    Signature,
    #[error("Identity tokens are not accepted: no secret configured")]
    NoSecret,
}

/// Signs and verifies identity tokens with a shared 32-byte secret
#[derive(Clone)]
pub struct IdentityTokenKey {
    secret: Option<[u8; 32]>,
}

impl std::fmt::Debug for IdentityTokenKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityTokenKey")
            .field("configured", &self.secret.is_some())
            .finish()
    }
}

impl IdentityTokenKey {
    pub fn new(secret: [u8; 32]) -> Self {
        Self {
            secret: Some(secret),
        }
    }

    /// A key that rejects every token
    pub fn disabled() -> Self {
        Self { secret: None }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Mint a token for `user_id`
    pub fn sign(&self, user_id: Uuid) -> Result<String, IdentityTokenError> {
        let secret = self.secret.as_ref().ok_or(IdentityTokenError::NoSecret)?;
        let id_bytes = user_id.as_bytes();
        let tag = hmac_sha256(secret, id_bytes);

        let mut token = Vec::with_capacity(ID_LEN + TAG_LEN);
        token.extend_from_slice(id_bytes);
        token.extend_from_slice(&tag);
        Ok(to_base64_url(&token))
    }

    /// Verify a token and return the user id it carries
    pub fn verify(&self, token: &str) -> Result<Uuid, IdentityTokenError> {
        let secret = self.secret.as_ref().ok_or(IdentityTokenError::NoSecret)?;
        let data = from_base64_url(token.trim()).map_err(|_| IdentityTokenError::Encoding)?;
        if data.len() != ID_LEN + TAG_LEN {
            return Err(IdentityTokenError::Length(data.len()));
        }

        let (id_bytes, tag) = data.split_at(ID_LEN);
        if !verify_hmac_sha256(secret, id_bytes, tag) {
            return Err(IdentityTokenError::Signature);
        }

        let id: [u8; ID_LEN] = id_bytes
            .try_into()
            .map_err(|_| IdentityTokenError::Length(data.len()))?;
        Ok(Uuid::from_bytes(id))
    }
}
