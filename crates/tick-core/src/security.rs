use secrecy::{ExposeSecret, SecretString};

use crate::errors::ValidationError;

/// Length of a GitHub personal access token.
pub const GITHUB_TOKEN_LEN: usize = 40;

/// GitHub access token with secrecy protection (zeroized on drop, redacted in Debug).
#[derive(Clone)]
pub struct GithubToken(SecretString);

impl GithubToken {
    /// Validate and wrap a raw token.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let actual = raw.chars().count();
        if actual != GITHUB_TOKEN_LEN {
            return Err(ValidationError::TokenLength {
                expected: GITHUB_TOKEN_LEN,
                actual,
            });
        }
        Ok(Self(SecretString::from(raw.to_string())))
    }

    /// Wrap a token read back from storage without re-validating it.
    pub fn from_stored(raw: String) -> Self {
        Self(SecretString::from(raw))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for GithubToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GithubToken([REDACTED])")
    }
}
