//! Authenticated principal model.
//!
//! A snapshot of the identity-provider claims attached to a session at
//! login time. Different providers surface the user's email in different
//! places, so matching walks an explicit, ordered list of candidate
//! fields rather than sniffing record shapes dynamically.

use serde::{Deserialize, Serialize};

/// Nested profile claims, as returned by some identity providers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileClaims {
    /// Email address inside the nested profile object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The authenticated principal bound to a session.
///
/// All fields are optional: the revocation scanner must tolerate records
/// with partially-populated principals and simply skip non-matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Principal {
    /// Subject identifier assigned by the identity provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Primary email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Additional email addresses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<String>,

    /// Preferred username (often an email at corporate providers).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,

    /// Nested profile claims.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileClaims>,
}

impl Principal {
    /// Creates a principal with just a primary email.
    #[must_use]
    pub fn from_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Sets the subject identifier.
    #[must_use]
    pub fn with_sub(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    /// Sets the preferred username.
    #[must_use]
    pub fn with_preferred_username(mut self, username: impl Into<String>) -> Self {
        self.preferred_username = Some(username.into());
        self
    }

    /// All email-bearing fields in priority order: primary email, the
    /// emails array, the nested profile email, then preferred username.
    pub fn email_candidates(&self) -> impl Iterator<Item = &str> {
        self.email
            .as_deref()
            .into_iter()
            .chain(self.emails.iter().map(String::as_str))
            .chain(
                self.profile
                    .as_ref()
                    .and_then(|p| p.email.as_deref())
                    .into_iter(),
            )
            .chain(self.preferred_username.as_deref().into_iter())
            .filter(|s| !s.is_empty())
    }

    /// The first non-empty email candidate, if any.
    #[must_use]
    pub fn primary_email(&self) -> Option<&str> {
        self.email_candidates().next()
    }

    /// Checks whether any email-bearing field matches, case-insensitively.
    #[must_use]
    pub fn matches_email(&self, email: &str) -> bool {
        let needle = email.to_lowercase();
        self.email_candidates()
            .any(|candidate| candidate.to_lowercase() == needle)
    }

    /// Checks whether the subject identifier matches exactly.
    #[must_use]
    pub fn matches_sub(&self, sub: &str) -> bool {
        self.sub.as_deref() == Some(sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_in_priority_order() {
        let principal = Principal {
            sub: Some("u-1".to_string()),
            email: Some("primary@example.com".to_string()),
            emails: vec!["second@example.com".to_string()],
            preferred_username: Some("pref@example.com".to_string()),
            profile: Some(ProfileClaims {
                email: Some("profile@example.com".to_string()),
            }),
        };

        let candidates: Vec<&str> = principal.email_candidates().collect();
        assert_eq!(
            candidates,
            vec![
                "primary@example.com",
                "second@example.com",
                "profile@example.com",
                "pref@example.com",
            ]
        );
        assert_eq!(principal.primary_email(), Some("primary@example.com"));
    }

    #[test]
    fn empty_fields_are_skipped() {
        let principal = Principal {
            email: Some(String::new()),
            preferred_username: Some("only@example.com".to_string()),
            ..Principal::default()
        };

        assert_eq!(principal.primary_email(), Some("only@example.com"));
    }

    #[test]
    fn email_match_is_case_insensitive() {
        let principal = Principal::from_email("Foo@Bar.com");

        assert!(principal.matches_email("foo@bar.com"));
        assert!(principal.matches_email("FOO@BAR.COM"));
        assert!(!principal.matches_email("other@bar.com"));
    }

    #[test]
    fn sub_match_is_exact() {
        let principal = Principal::from_email("a@b.com").with_sub("user-123");

        assert!(principal.matches_sub("user-123"));
        assert!(!principal.matches_sub("USER-123"));
        assert!(!Principal::default().matches_sub("user-123"));
    }

    #[test]
    fn match_on_profile_email_only() {
        let principal = Principal {
            profile: Some(ProfileClaims {
                email: Some("nested@example.com".to_string()),
            }),
            ..Principal::default()
        };

        assert!(principal.matches_email("Nested@Example.com"));
    }
}
