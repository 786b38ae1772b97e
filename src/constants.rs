//! # Registry Constants
//!
//! Names and labels that define the fixed boundaries of the helpers namespace.

/// Label of the root namespace, used as the first segment of every rendered path
pub const ROOT_NAME: &str = "helpers";

/// Name the plugin announces itself under to the host test framework
pub const PLUGIN_NAME: &str = "helpers-namespace";

/// Separator between segments of a dotted helper path
pub const PATH_SEPARATOR: char = '.';

/// Prefix for environment variables read by [`crate::config::HelpersConfig`]
pub const ENV_PREFIX: &str = "HELPERS_NAMESPACE";

/// Names intercepted before any namespace lookup or mutation.
///
/// These are the methods callable on a namespace node. Binding a helper or
/// namespace under one of them would make dotted-path access ambiguous, so
/// they can never become part of a namespace.
pub const RESERVED_NAMES: &[&str] = &[
    "path",
    "get",
    "resolve",
    "lookup",
    "register",
    "register_as",
    "named",
    "register_at",
    "call",
    "contains",
    "names",
    "len",
    "is_empty",
    "clear",
    "describe",
    "snapshot",
    "stats",
];

/// Returns true when `name` is on the reserved disallow-list
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_reserved() {
        assert!(is_reserved("register"));
        assert!(is_reserved("contains"));
        assert!(!is_reserved("foo"));
        assert!(!is_reserved("Register"));
    }

    #[test]
    fn test_every_namespace_method_is_reserved() {
        for name in [
            "path", "register_at", "clear", "names", "len", "is_empty", "snapshot", "stats",
        ] {
            assert!(is_reserved(name), "{name} should be reserved");
        }
    }
}
