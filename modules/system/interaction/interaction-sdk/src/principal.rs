//! Caller identity: claims, identities and the principal built from them.

use serde::{Deserialize, Serialize};

use crate::constants::claims;

/// A single claim asserted about a principal. Multi-valued claims are
/// represented as repeated claims with the same `claim_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_type: String,
    pub value: String,
}

impl Claim {
    #[must_use]
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }
}

/// One identity of a principal: a claim set plus the way it was authenticated.
///
/// An identity without an authentication type is present but unauthenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    authentication_type: Option<String>,
    #[serde(default)]
    claims: Vec<Claim>,
}

impl Identity {
    #[must_use]
    pub fn new(authentication_type: Option<String>, claims: Vec<Claim>) -> Self {
        Self {
            authentication_type,
            claims,
        }
    }

    /// Identity that carries claims but was never authenticated.
    #[must_use]
    pub fn unauthenticated(claims: Vec<Claim>) -> Self {
        Self::new(None, claims)
    }

    #[must_use]
    pub fn authentication_type(&self) -> Option<&str> {
        self.authentication_type.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authentication_type
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }

    #[must_use]
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }
}

/// `Principal` is the user behind the current session.
///
/// Built by the session layer from the authentication cookie and passed into
/// the validators explicitly. A principal may carry no identity at all
/// (see [`Principal::anonymous`]) or only unauthenticated identities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    #[serde(default)]
    identities: Vec<Identity>,
}

impl Principal {
    /// Create a new `Principal` builder
    #[must_use]
    pub fn builder() -> PrincipalBuilder {
        PrincipalBuilder::default()
    }

    /// Principal with no identities.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_identities(identities: Vec<Identity>) -> Self {
        Self { identities }
    }

    #[must_use]
    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    /// True when at least one identity is authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identities.iter().any(Identity::is_authenticated)
    }

    /// All claims across identities, in identity order.
    pub fn claims(&self) -> impl Iterator<Item = &Claim> {
        self.identities.iter().flat_map(|i| i.claims.iter())
    }

    /// First value of `claim_type` across identities.
    #[must_use]
    pub fn find_first(&self, claim_type: &str) -> Option<&str> {
        self.claims()
            .find(|c| c.claim_type == claim_type)
            .map(|c| c.value.as_str())
    }

    /// Subject identifier (`sub` claim).
    #[must_use]
    pub fn subject_id(&self) -> Option<&str> {
        self.find_first(claims::SUBJECT)
    }

    /// Display name (`name` claim).
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.find_first(claims::NAME)
    }
}

/// Builds a principal with a single authenticated identity.
#[derive(Default)]
pub struct PrincipalBuilder {
    subject_id: Option<String>,
    name: Option<String>,
    authentication_type: Option<String>,
    authentication_method: Option<String>,
    identity_provider: Option<String>,
    auth_time: Option<i64>,
    extra: Vec<Claim>,
}

impl PrincipalBuilder {
    #[must_use]
    pub fn subject_id(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Overrides the identity's authentication type (defaults to `idsvr`).
    #[must_use]
    pub fn authentication_type(mut self, authentication_type: impl Into<String>) -> Self {
        self.authentication_type = Some(authentication_type.into());
        self
    }

    #[must_use]
    pub fn authentication_method(mut self, amr: impl Into<String>) -> Self {
        self.authentication_method = Some(amr.into());
        self
    }

    #[must_use]
    pub fn identity_provider(mut self, idp: impl Into<String>) -> Self {
        self.identity_provider = Some(idp.into());
        self
    }

    /// Authentication time as Unix seconds.
    #[must_use]
    pub fn auth_time(mut self, epoch_seconds: i64) -> Self {
        self.auth_time = Some(epoch_seconds);
        self
    }

    #[must_use]
    pub fn claim(mut self, claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push(Claim::new(claim_type, value));
        self
    }

    #[must_use]
    pub fn build(self) -> Principal {
        let mut claim_set = Vec::with_capacity(5 + self.extra.len());
        if let Some(sub) = self.subject_id {
            claim_set.push(Claim::new(claims::SUBJECT, sub));
        }
        if let Some(name) = self.name {
            claim_set.push(Claim::new(claims::NAME, name));
        }
        claim_set.push(Claim::new(
            claims::AUTHENTICATION_METHOD,
            self.authentication_method
                .unwrap_or_else(|| "password".to_owned()),
        ));
        claim_set.push(Claim::new(
            claims::IDENTITY_PROVIDER,
            self.identity_provider.unwrap_or_else(|| "idsvr".to_owned()),
        ));
        if let Some(auth_time) = self.auth_time {
            claim_set.push(Claim::new(claims::AUTHENTICATION_TIME, auth_time.to_string()));
        }
        claim_set.extend(self.extra);

        let authentication_type = self.authentication_type.unwrap_or_else(|| "idsvr".to_owned());
        Principal {
            identities: vec![Identity::new(Some(authentication_type), claim_set)],
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn builder_populates_subject_and_name() {
        let principal = Principal::builder()
            .subject_id("alice")
            .name("Alice")
            .auth_time(1_700_000_000)
            .build();

        assert!(principal.is_authenticated());
        assert_eq!(principal.subject_id(), Some("alice"));
        assert_eq!(principal.name(), Some("Alice"));
        assert_eq!(principal.find_first(claims::AUTHENTICATION_METHOD), Some("password"));
        assert_eq!(principal.find_first(claims::IDENTITY_PROVIDER), Some("idsvr"));
        assert_eq!(principal.find_first(claims::AUTHENTICATION_TIME), Some("1700000000"));
    }

    #[test]
    fn anonymous_principal_is_not_authenticated() {
        let principal = Principal::anonymous();

        assert!(!principal.is_authenticated());
        assert!(principal.identities().is_empty());
        assert_eq!(principal.subject_id(), None);
    }

    #[test]
    fn identity_without_authentication_type_is_not_authenticated() {
        let principal = Principal::from_identities(vec![Identity::unauthenticated(vec![
            Claim::new(claims::SUBJECT, "alice"),
        ])]);

        assert!(!principal.is_authenticated());
        assert_eq!(principal.subject_id(), Some("alice"));
    }

    #[test]
    fn empty_authentication_type_is_not_authenticated() {
        let identity = Identity::new(Some(String::new()), Vec::new());
        assert!(!identity.is_authenticated());
    }

    #[test]
    fn multi_valued_claims_are_preserved() {
        let principal = Principal::builder()
            .subject_id("bob")
            .claim("role", "admin")
            .claim("role", "auditor")
            .build();

        let roles: Vec<&str> = principal
            .claims()
            .filter(|c| c.claim_type == "role")
            .map(|c| c.value.as_str())
            .collect();
        assert_eq!(roles, vec!["admin", "auditor"]);
    }
}
