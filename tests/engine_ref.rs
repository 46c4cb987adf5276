// ABOUTME: Integration tests for engine image reference handling.
// ABOUTME: Tests resolve, parse, display, and version extraction properties.

use ananeo::types::EngineRef;

mod resolve {
    use super::*;

    #[test]
    fn renders_canonical_form() {
        let reference = EngineRef::resolve("docker.io/acme", "engine", "1.2.3");
        assert_eq!(reference.to_string(), "docker.io/acme/engine:1.2.3");
    }

    #[test]
    fn is_deterministic() {
        let a = EngineRef::resolve("ghcr.io/org", "engine-ee", "2.0.0");
        let b = EngineRef::resolve("ghcr.io/org", "engine-ee", "2.0.0");
        assert_eq!(a, b);
    }

    #[test]
    fn exposes_components() {
        let reference = EngineRef::resolve("registry.example.com:5000/acme", "engine", "rc1");
        assert_eq!(reference.registry_prefix(), "registry.example.com:5000/acme");
        assert_eq!(reference.name(), "engine");
        assert_eq!(reference.version(), "rc1");
    }
}

mod parse {
    use super::*;

    #[test]
    fn parses_canonical_reference() {
        let reference = EngineRef::parse("docker.io/acme/engine:1.2.3").unwrap();
        assert_eq!(reference.registry_prefix(), "docker.io/acme");
        assert_eq!(reference.name(), "engine");
        assert_eq!(reference.version(), "1.2.3");
    }

    #[test]
    fn parse_empty_returns_error() {
        assert!(EngineRef::parse("").is_err());
        assert!(EngineRef::parse("   ").is_err());
    }

    #[test]
    fn parse_rejects_missing_version() {
        assert!(EngineRef::parse("docker.io/acme/engine").is_err());
    }

    #[test]
    fn parse_rejects_bare_name() {
        assert!(EngineRef::parse("engine:1.0.0").is_err());
    }

    #[test]
    fn parse_rejects_invalid_characters() {
        assert!(EngineRef::parse("docker.io/acme/engine:1 .0").is_err());
    }

    #[test]
    fn parse_round_trips_through_display() {
        let reference = EngineRef::parse("ghcr.io/org/engine-ee:v2.1.0").unwrap();
        assert_eq!(
            EngineRef::parse(&reference.to_string()).unwrap(),
            reference
        );
    }
}

mod extract_version {
    use super::*;

    #[test]
    fn extracts_matching_reference() {
        let version = EngineRef::extract_version(
            "docker.io/acme/engine:1.2.3",
            "docker.io/acme",
            "engine",
        );
        assert_eq!(version, Some("1.2.3"));
    }

    #[test]
    fn foreign_prefix_is_absent_not_an_error() {
        let version =
            EngineRef::extract_version("ghcr.io/other/engine:1.2.3", "docker.io/acme", "engine");
        assert_eq!(version, None);
    }

    #[test]
    fn foreign_name_is_absent() {
        let version = EngineRef::extract_version(
            "docker.io/acme/ce-engine:1.2.3",
            "docker.io/acme",
            "engine",
        );
        assert_eq!(version, None);
    }

    #[test]
    fn missing_version_is_absent() {
        let version =
            EngineRef::extract_version("docker.io/acme/engine", "docker.io/acme", "engine");
        assert_eq!(version, None);
    }

    #[test]
    fn name_prefix_collision_is_absent() {
        // "engine-ee" starts with "engine" but is a different image.
        let version = EngineRef::extract_version(
            "docker.io/acme/engine-ee:1.2.3",
            "docker.io/acme",
            "engine",
        );
        assert_eq!(version, None);
    }

    #[test]
    fn extraction_matches_resolve() {
        let reference = EngineRef::resolve("registry.example.com/acme", "engine-ee", "2.1.0");
        let reference_str = reference.to_string();
        let version = EngineRef::extract_version(
            &reference_str,
            "registry.example.com/acme",
            "engine-ee",
        );
        assert_eq!(version, Some("2.1.0"));
    }
}
