use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CircleError, CircleResult};
use crate::validation;

/// An opaque caller identity (a wallet address or contract principal).
/// Two principals are the same identity only if their text is identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);

impl Principal {
    pub fn parse(value: &str) -> CircleResult<Self> {
        validation::principal(value).map(|p| Self(p.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Principal {
    type Error = CircleError;

    fn try_from(value: String) -> CircleResult<Self> {
        validation::principal(&value)?;
        Ok(Self(value))
    }
}

impl From<Principal> for String {
    fn from(value: Principal) -> Self {
        value.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
