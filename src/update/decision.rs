// ABOUTME: Update decision: compare a running container's image against the target.
// ABOUTME: Pure version comparison; version validation happens on the request.

use crate::types::EngineRef;

/// What to do about the currently bound image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDecision {
    /// The running container already matches the requested version.
    NoChangeNeeded,
    /// Pull the target image and swap the task onto it.
    PullAndSwap,
}

/// Decide between no-op and pull-and-swap.
///
/// `current_reference` is the image reference the running container is bound
/// to, or `None` when no container exists. A reference that does not match
/// the target's prefix/name shape means a foreign image occupies the engine
/// slot; that is "needs update", not an error. Only the exact
/// `prefix/name:version` match with equal version is a no-op.
pub fn decide(current_reference: Option<&str>, target: &EngineRef) -> UpdateDecision {
    let current_version = current_reference.and_then(|reference| {
        EngineRef::extract_version(reference, target.registry_prefix(), target.name())
    });

    match current_version {
        Some(version) if version == target.version() => UpdateDecision::NoChangeNeeded,
        _ => UpdateDecision::PullAndSwap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> EngineRef {
        EngineRef::resolve("registry.example.com/acme", "engine-ee", "2.1.0")
    }

    #[test]
    fn matching_version_is_noop() {
        let decision = decide(Some("registry.example.com/acme/engine-ee:2.1.0"), &target());
        assert_eq!(decision, UpdateDecision::NoChangeNeeded);
    }

    #[test]
    fn different_version_needs_swap() {
        let decision = decide(Some("registry.example.com/acme/engine-ee:2.0.9"), &target());
        assert_eq!(decision, UpdateDecision::PullAndSwap);
    }

    #[test]
    fn version_comparison_is_case_sensitive() {
        let target = EngineRef::resolve("registry.example.com/acme", "engine-ee", "RC1");
        let decision = decide(Some("registry.example.com/acme/engine-ee:rc1"), &target);
        assert_eq!(decision, UpdateDecision::PullAndSwap);
    }

    #[test]
    fn foreign_image_needs_swap() {
        // A different image occupying the engine slot is not a parse failure.
        let decision = decide(Some("docker.io/library/nginx:latest"), &target());
        assert_eq!(decision, UpdateDecision::PullAndSwap);
    }

    #[test]
    fn missing_container_needs_swap() {
        assert_eq!(decide(None, &target()), UpdateDecision::PullAndSwap);
    }

    #[test]
    fn same_name_under_other_prefix_needs_swap() {
        let decision = decide(Some("ghcr.io/other/engine-ee:2.1.0"), &target());
        assert_eq!(decision, UpdateDecision::PullAndSwap);
    }
}
