//! Deterministic message-store key for consent decisions.

use std::collections::BTreeSet;
use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

const KEY_DOMAIN: &[u8] = b"interaction.consent.v1";

/// Key under which a consent decision is stored.
///
/// Derived from `(client_id, subject_id, nonce, scopes)`. Scopes are compared
/// as a set: order and duplicates do not affect the key. Every field is length
/// prefixed before hashing so field boundaries cannot be shifted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConsentKey(String);

impl ConsentKey {
    #[must_use]
    pub fn derive<S: AsRef<str>>(
        client_id: &str,
        subject_id: &str,
        nonce: Option<&str>,
        scopes: &[S],
    ) -> Self {
        let scopes: BTreeSet<&str> = scopes.iter().map(AsRef::<str>::as_ref).collect();

        let mut hasher = Sha256::new();
        hasher.update(KEY_DOMAIN);
        update_field(&mut hasher, client_id.as_bytes());
        update_field(&mut hasher, subject_id.as_bytes());
        match nonce {
            Some(nonce) => {
                hasher.update([1u8]);
                update_field(&mut hasher, nonce.as_bytes());
            }
            None => hasher.update([0u8]),
        }
        hasher.update(encode_len(scopes.len()));
        for scope in scopes {
            update_field(&mut hasher, scope.as_bytes());
        }

        Self(URL_SAFE_NO_PAD.encode(hasher.finalize()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConsentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ConsentKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn update_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update(encode_len(bytes.len()));
    hasher.update(bytes);
}

fn encode_len(len: usize) -> [u8; 8] {
    u64::try_from(len).unwrap_or(u64::MAX).to_be_bytes()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn key(client: &str, sub: &str, nonce: Option<&str>, scopes: &[&str]) -> ConsentKey {
        ConsentKey::derive(client, sub, nonce, scopes)
    }

    #[test]
    fn same_inputs_derive_same_key() {
        let a = key("web", "alice", Some("n1"), &["openid", "profile"]);
        let b = key("web", "alice", Some("n1"), &["openid", "profile"]);
        assert_eq!(a, b);
    }

    #[test]
    fn scopes_are_compared_as_a_set() {
        let a = key("web", "alice", Some("n1"), &["openid", "profile", "email"]);
        let b = key("web", "alice", Some("n1"), &["email", "openid", "profile", "openid"]);
        assert_eq!(a, b);
    }

    #[test]
    fn each_field_changes_the_key() {
        let base = key("web", "alice", Some("n1"), &["openid"]);

        assert_ne!(base, key("mobile", "alice", Some("n1"), &["openid"]));
        assert_ne!(base, key("web", "bob", Some("n1"), &["openid"]));
        assert_ne!(base, key("web", "alice", Some("n2"), &["openid"]));
        assert_ne!(base, key("web", "alice", Some("n1"), &["openid", "email"]));
    }

    #[test]
    fn field_boundaries_cannot_be_shifted() {
        assert_ne!(
            key("ab", "c", None, &["openid"]),
            key("a", "bc", None, &["openid"])
        );
        assert_ne!(
            key("web", "alice", None, &["a,b"]),
            key("web", "alice", None, &["a", "b"])
        );
    }

    #[test]
    fn absent_and_empty_nonce_differ() {
        assert_ne!(
            key("web", "alice", None, &["openid"]),
            key("web", "alice", Some(""), &["openid"])
        );
    }

    #[test]
    fn key_is_url_safe() {
        let k = key("web", "alice", Some("n1"), &["openid"]);
        assert_eq!(k.as_str().len(), 43);
        assert!(
            k.as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }
}
