// ABOUTME: Engine image reference construction and version extraction.
// ABOUTME: Canonical form is "registry-prefix/name:version", all parts required.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseEngineRefError {
    #[error("engine image reference cannot be empty")]
    Empty,

    #[error("invalid character in engine image reference: {0}")]
    InvalidChar(char),

    #[error("invalid engine image reference format: {0}")]
    InvalidFormat(String),
}

/// A fully-qualified engine image reference.
///
/// Unlike a general container image reference, an engine reference always has
/// all three parts: the registry prefix (which may itself contain slashes,
/// e.g. `docker.io/acme`), the image name, and the version used as the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineRef {
    registry_prefix: String,
    name: String,
    version: String,
}

impl EngineRef {
    /// Build a reference from its parts. Pure construction: component
    /// validation happens at the configuration boundary via [`EngineRef::parse`].
    pub fn resolve(registry_prefix: &str, name: &str, version: &str) -> Self {
        Self {
            registry_prefix: registry_prefix.to_string(),
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    /// Parse a canonical `prefix/name:version` string.
    pub fn parse(input: &str) -> Result<Self, ParseEngineRefError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseEngineRefError::Empty);
        }

        for c in input.chars() {
            if !c.is_ascii_alphanumeric()
                && c != '/'
                && c != ':'
                && c != '.'
                && c != '-'
                && c != '_'
            {
                return Err(ParseEngineRefError::InvalidChar(c));
            }
        }

        let (without_version, version) = input
            .rsplit_once(':')
            .ok_or_else(|| ParseEngineRefError::InvalidFormat(input.to_string()))?;

        // A colon inside the path portion means this was a registry port,
        // not a version tag.
        if version.is_empty() || version.contains('/') {
            return Err(ParseEngineRefError::InvalidFormat(input.to_string()));
        }

        let (registry_prefix, name) = without_version
            .rsplit_once('/')
            .ok_or_else(|| ParseEngineRefError::InvalidFormat(input.to_string()))?;

        if registry_prefix.is_empty() || name.is_empty() {
            return Err(ParseEngineRefError::InvalidFormat(input.to_string()));
        }

        Ok(Self {
            registry_prefix: registry_prefix.to_string(),
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    /// Extract the version from a reference of the exact shape
    /// `expected_prefix/expected_name:version`.
    ///
    /// Returns `None` when the reference does not match the expected
    /// prefix/name shape. That is not a parse failure: it signals the
    /// container is bound to a different image entirely, which callers treat
    /// as "needs update".
    pub fn extract_version<'a>(
        reference: &'a str,
        expected_prefix: &str,
        expected_name: &str,
    ) -> Option<&'a str> {
        let rest = reference.strip_prefix(expected_prefix)?;
        let rest = rest.strip_prefix('/')?;
        let rest = rest.strip_prefix(expected_name)?;
        let version = rest.strip_prefix(':')?;

        if version.is_empty() || version.contains('/') || version.contains(':') {
            return None;
        }
        Some(version)
    }

    pub fn registry_prefix(&self) -> &str {
        &self.registry_prefix
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for EngineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.registry_prefix, self.name, self.version)
    }
}
