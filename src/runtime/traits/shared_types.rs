// ABOUTME: Shared types used across runtime trait definitions.
// ABOUTME: Registry credentials passed through to pull operations.

/// Registry authentication credentials.
#[derive(Debug, Clone, Default)]
pub struct RegistryAuth {
    /// Username.
    pub username: String,
    /// Password or token.
    pub password: String,
    /// Registry server (e.g., "ghcr.io").
    pub server: Option<String>,
}
