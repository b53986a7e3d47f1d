use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A natural-language assertion to verify.
///
/// The text is trimmed on construction and never mutated afterwards; no other
/// normalization is applied. Empty (or whitespace-only) input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Claim(String);

#[derive(Debug, Error)]
#[error("claim must not be empty")]
pub struct EmptyClaimError;

impl Claim {
    pub fn new(text: impl AsRef<str>) -> Result<Self, EmptyClaimError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            Err(EmptyClaimError)
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Claim {
    type Error = EmptyClaimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Claim {
    type Error = EmptyClaimError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Claim> for String {
    fn from(value: Claim) -> Self {
        value.0
    }
}

impl AsRef<str> for Claim {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Claim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Claim;

    #[test]
    fn trims_surrounding_whitespace() {
        let claim = Claim::new("  Mount Everest is the tallest mountain \n").unwrap();
        assert_eq!(claim.as_str(), "Mount Everest is the tallest mountain");
    }

    #[test]
    fn rejects_empty_input() {
        assert!(Claim::new("").is_err());
        assert!(Claim::new("   \t").is_err());
    }
}
