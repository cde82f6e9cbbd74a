//! Redis session registry and token denylist.
//!
//! One registry key per principal, `{role}:token:{username}`, holding the
//! raw session token with the session TTL. A session is live only while its
//! key holds the presented token: tokens that still verify cryptographically
//! are rejected once their registry entry is gone or replaced.
//!
//! Logout additionally denylists the raw token's SHA-256 digest for one
//! session lifetime, covering the window where the JWT itself has not yet
//! expired.

use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::debug;

use relawan_cache::RedisCache;

use crate::jwt::AuthError;
use crate::role::Role;

/// SHA-256 hex digest of a raw token, used as the denylist key segment.
pub fn token_digest(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    hex::encode(digest)
}

fn denylist_key(token: &str) -> String {
    format!("token:denylist:{}", token_digest(token))
}

/// Session registry over Redis.
#[derive(Clone, Debug)]
pub struct SessionStore {
    cache: RedisCache,
    session_ttl: Duration,
}

impl SessionStore {
    pub fn new(cache: RedisCache, session_ttl: Duration) -> Self {
        Self { cache, session_ttl }
    }

    /// Returns the stored token for a principal, if a session is live.
    pub async fn find(&self, role: Role, username: &str) -> Result<Option<String>, AuthError> {
        let token = self.cache.get_string(&role.session_key(username)).await?;
        Ok(token)
    }

    /// Records a freshly issued token, starting the session clock.
    pub async fn store(&self, role: Role, username: &str, token: &str) -> Result<(), AuthError> {
        self.cache
            .set_string_with_ttl(&role.session_key(username), token, self.session_ttl)
            .await?;

        debug!(%role, %username, "Session stored");

        Ok(())
    }

    /// Whether the presented token is the principal's live registry entry.
    ///
    /// Comparing against the stored value rather than checking bare
    /// existence keeps a token issued for one role's "andi" from riding on
    /// another role's live "andi" session.
    pub async fn is_live(&self, role: Role, username: &str, token: &str) -> Result<bool, AuthError> {
        let stored = self.find(role, username).await?;
        Ok(stored.as_deref() == Some(token))
    }

    /// Ends a session: deletes the registry key and denylists the token.
    ///
    /// Deleting an already-absent key is a success; the end state is the same.
    pub async fn revoke(&self, role: Role, username: &str, token: &str) -> Result<(), AuthError> {
        self.cache
            .del(&[role.session_key(username)])
            .await?;
        self.cache
            .set_string_with_ttl(&denylist_key(token), "1", self.session_ttl)
            .await?;

        debug!(%role, %username, "Session revoked");

        Ok(())
    }

    /// Whether a raw token has been denylisted by a logout.
    pub async fn is_denylisted(&self, token: &str) -> Result<bool, AuthError> {
        let denied = self.cache.exists(&denylist_key(token)).await?;
        Ok(denied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_sha256_hex() {
        // echo -n "abc" | sha256sum
        assert_eq!(
            token_digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn denylist_key_embeds_digest() {
        let key = denylist_key("abc");
        assert!(key.starts_with("token:denylist:"));
        assert!(key.ends_with(&token_digest("abc")));
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn store_find_revoke_lifecycle() {
        let cache = RedisCache::new("redis://localhost:6379", Duration::from_secs(60))
            .await
            .unwrap();
        let store = SessionStore::new(cache, Duration::from_secs(60));

        store
            .store(Role::User, "lifecycle-test", "tok-123")
            .await
            .unwrap();
        assert_eq!(
            store.find(Role::User, "lifecycle-test").await.unwrap(),
            Some("tok-123".to_string())
        );
        assert!(
            store
                .is_live(Role::User, "lifecycle-test", "tok-123")
                .await
                .unwrap()
        );

        // a different token is not this session, even while the entry lives
        assert!(
            !store
                .is_live(Role::User, "lifecycle-test", "tok-456")
                .await
                .unwrap()
        );

        store
            .revoke(Role::User, "lifecycle-test", "tok-123")
            .await
            .unwrap();
        assert!(
            !store
                .is_live(Role::User, "lifecycle-test", "tok-123")
                .await
                .unwrap()
        );
        assert!(store.is_denylisted("tok-123").await.unwrap());

        // revoking again is still a success
        store
            .revoke(Role::User, "lifecycle-test", "tok-123")
            .await
            .unwrap();
    }
}
