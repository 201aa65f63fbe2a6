//! Authentication primitives: credentials, roles, bearer tokens and the
//! claims decoded from them.
//!
//! Keep form parsing outside the domain by exposing constructors that
//! validate string inputs before a container talks to a gateway.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::UserId;

/// Domain error returned when credential values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
    /// Display name was missing or blank once trimmed.
    EmptyName,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyName => write!(f, "name must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

fn normalise_email(email: &str) -> Result<String, CredentialsValidationError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(CredentialsValidationError::EmptyEmail);
    }
    Ok(trimmed.to_owned())
}

fn require_password(password: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if password.is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use jobboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada@example.com ", "pw").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            email: normalise_email(email)?,
            password: require_password(password)?,
        })
    }

    /// Email address identifying the account.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Sign-up form for a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    email: String,
    password: Zeroizing<String>,
    role: Role,
}

impl Registration {
    /// Validate sign-up inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Self, CredentialsValidationError> {
        let trimmed_name = name.trim();
        if trimmed_name.is_empty() {
            return Err(CredentialsValidationError::EmptyName);
        }
        Ok(Self {
            name: trimmed_name.to_owned(),
            email: normalise_email(email)?,
            password: require_password(password)?,
            role,
        })
    }

    /// Display name for the account.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Email address for the account.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Chosen password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Requested role.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Current and replacement password for a password change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    current: Zeroizing<String>,
    replacement: Zeroizing<String>,
}

impl PasswordChange {
    /// Validate that both passwords are present.
    pub fn try_from_parts(current: &str, replacement: &str) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            current: require_password(current)?,
            replacement: require_password(replacement)?,
        })
    }

    /// Password currently set on the account.
    pub fn current(&self) -> &str {
        self.current.as_str()
    }

    /// Password to set.
    pub fn replacement(&self) -> &str {
        self.replacement.as_str()
    }
}

/// Account role claimed by the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Searches and applies to jobs.
    Candidate,
    /// Posts jobs and reviews applications.
    Employer,
    /// Sees aggregate statistics and manages users.
    Admin,
}

impl Role {
    /// Parse a role claim. Matching is exact, as issued by the backend.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "candidate" => Some(Self::Candidate),
            "employer" => Some(Self::Employer),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Wire name of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Employer => "employer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while decoding the claims segment of a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenDecodeError {
    /// The token did not have three dot-separated segments.
    #[error("token is not a JWT")]
    Malformed,
    /// The payload segment was not base64url.
    #[error("token payload is not base64url: {0}")]
    Encoding(String),
    /// The payload did not hold the expected claims.
    #[error("token payload is not valid claims JSON: {0}")]
    Claims(String),
}

/// Opaque bearer credential issued by the backend.
///
/// The value is zeroised on drop and redacted from debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Wrap a raw token string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Raw token for the `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Decode the claims carried in the token payload.
    ///
    /// The signature is not checked; the backend verifies it on every call.
    pub fn claims(&self) -> Result<TokenClaims, TokenDecodeError> {
        let mut segments = self.expose().split('.');
        let (Some(_header), Some(payload), Some(_signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenDecodeError::Malformed);
        };
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|err| TokenDecodeError::Encoding(err.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|err| TokenDecodeError::Claims(err.to_string()))
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Claims decoded from a bearer token.
///
/// `role` is kept as the raw string so unknown roles reach the routing gate
/// instead of failing the decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account identifier.
    #[serde(rename = "userId", default)]
    pub user_id: Option<UserId>,
    /// Raw role claim.
    #[serde(default)]
    pub role: String,
    /// Email, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expiry as seconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Issue time as seconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Parsed role, or `None` when the claim is not a known role.
    pub fn known_role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    /// Whether the token has expired at `now`. Tokens without `exp` never
    /// expire client-side.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp.is_some_and(|exp| exp <= now.timestamp())
    }
}


#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::test_tokens::token_with_payload;
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("", "pw", CredentialsValidationError::EmptyEmail)]
    #[case("   ", "pw", CredentialsValidationError::EmptyEmail)]
    #[case("ada@example.com", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn registration_requires_a_name() {
        let err = Registration::try_from_parts(" ", "a@b.c", "pw", Role::Candidate)
            .expect_err("blank name must fail");
        assert_eq!(err, CredentialsValidationError::EmptyName);
    }

    #[rstest]
    #[case("candidate", Some(Role::Candidate))]
    #[case("employer", Some(Role::Employer))]
    #[case("admin", Some(Role::Admin))]
    #[case("Admin", None)]
    #[case("recruiter", None)]
    fn role_parsing_is_exact(#[case] raw: &str, #[case] expected: Option<Role>) {
        assert_eq!(Role::parse(raw), expected);
    }

    #[rstest]
    fn claims_decode_from_the_payload_segment() {
        let token = token_with_payload(&json!({
            "userId": 12,
            "role": "employer",
            "name": "Grace",
            "exp": 2_000_000_000_i64
        }));
        let claims = token.claims().expect("claims decode");
        assert_eq!(claims.user_id, Some(UserId::new(12)));
        assert_eq!(claims.known_role(), Some(Role::Employer));
        assert_eq!(claims.name.as_deref(), Some("Grace"));
        assert!(claims.email.is_none());
    }

    #[rstest]
    fn claims_without_user_id_still_decode() {
        let token = token_with_payload(&json!({ "role": "candidate" }));
        let claims = token.claims().expect("claims decode");
        assert!(claims.user_id.is_none());
    }

    #[rstest]
    #[case("not-a-token")]
    #[case("a.b")]
    #[case("a.b.c.d")]
    fn malformed_tokens_are_rejected(#[case] raw: &str) {
        let err = BearerToken::new(raw).claims().expect_err("must fail");
        assert_eq!(err, TokenDecodeError::Malformed);
    }

    #[rstest]
    fn invalid_payload_encoding_is_reported() {
        let err = BearerToken::new("h.!!!.s").claims().expect_err("must fail");
        assert!(matches!(err, TokenDecodeError::Encoding(_)));
    }

    #[rstest]
    fn expiry_is_compared_with_the_given_instant() {
        let claims = TokenClaims {
            user_id: None,
            role: "admin".to_owned(),
            email: None,
            name: None,
            exp: Some(1_000),
            iat: None,
        };
        let before = Utc.timestamp_opt(999, 0).single().expect("valid instant");
        let after = Utc.timestamp_opt(1_000, 0).single().expect("valid instant");
        assert!(!claims.is_expired_at(before));
        assert!(claims.is_expired_at(after));
    }

    #[rstest]
    fn debug_output_redacts_the_token() {
        let token = BearerToken::new("secret.value.here");
        assert_eq!(format!("{token:?}"), "BearerToken(<redacted>)");
    }
}
