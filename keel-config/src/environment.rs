//! Application environment selection.

use std::fmt;
use std::str::FromStr;

/// Environment variable consulted by [`Environment::current`] by default.
pub const ENVIRONMENT_VAR: &str = "KEEL_ENVIRONMENT";

/// Fallback environment when the variable is unset.
pub const DEFAULT_ENVIRONMENT: Environment = Environment::Production;

/// Supported application environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Local development
    Develop,
    /// Test runs
    Testing,
    /// Pre-production staging
    Staging,
    /// Production
    Production,
}

impl Environment {
    pub const ALL: [Environment; 4] = [
        Environment::Develop,
        Environment::Testing,
        Environment::Staging,
        Environment::Production,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Develop => "develop",
            Environment::Testing => "testing",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Resolve the current environment from `KEEL_ENVIRONMENT`, falling
    /// back to production when unset or unrecognized.
    pub fn current() -> Self {
        Self::from_env_var(ENVIRONMENT_VAR)
    }

    /// Resolve from a custom environment variable.
    pub fn from_env_var(var: &str) -> Self {
        std::env::var(var)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_ENVIRONMENT)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "develop" => Ok(Environment::Develop),
            "testing" => Ok(Environment::Testing),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            _ => Err(()),
        }
    }
}
