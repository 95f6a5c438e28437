//! Who is calling
//!
//! Resolved per request by the caller middleware. Anonymous access is
//! always allowed; a presented token must verify.

use kernel::id::UserId;
use platform::client::ClientFingerprint;

pub const ANONYMOUS_VOTER: &str = "anonymous";

#[derive(Debug, Clone, Default)]
pub struct CallerIdentity {
    /// Set when a valid identity token was presented
    pub user_id: Option<UserId>,
    /// Voter key derived from the client fingerprint
    pub fingerprint_key: Option<String>,
}

impl CallerIdentity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(user_id: Option<UserId>, fingerprint: Option<&ClientFingerprint>) -> Self {
        Self {
            user_id,
            fingerprint_key: fingerprint.map(ClientFingerprint::voter_key),
        }
    }

    /// Identity a vote is recorded under
    ///
    /// Precedence: signed-in user, then the address claimed in the request,
    /// then the client fingerprint, then the shared anonymous identity.
    pub fn voter_identity(&self, claimed_address: Option<&str>) -> String {
        if let Some(user_id) = self.user_id {
            return format!("user:{user_id}");
        }
        if let Some(address) = claimed_address
            .map(str::trim)
            .filter(|a| !a.is_empty() && !a.eq_ignore_ascii_case(ANONYMOUS_VOTER))
        {
            return address.to_string();
        }
        self.fingerprint_key
            .clone()
            .unwrap_or_else(|| ANONYMOUS_VOTER.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_wins_over_everything() {
        let user = UserId::new();
        let caller = CallerIdentity {
            user_id: Some(user),
            fingerprint_key: Some("fp:abc".to_string()),
        };
        assert_eq!(caller.voter_identity(Some("0xwallet")), format!("user:{user}"));
    }

    #[test]
    fn claimed_address_then_fingerprint_then_anonymous() {
        let caller = CallerIdentity {
            user_id: None,
            fingerprint_key: Some("fp:abc".to_string()),
        };
        assert_eq!(caller.voter_identity(Some(" 0xwallet ")), "0xwallet");
        assert_eq!(caller.voter_identity(Some("anonymous")), "fp:abc");
        assert_eq!(caller.voter_identity(None), "fp:abc");
        assert_eq!(CallerIdentity::anonymous().voter_identity(None), "anonymous");
    }
}
