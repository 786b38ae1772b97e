//! End-to-end Helpers Namespace Tests
//!
//! Setup code registers through the session slot, test bodies resolve through
//! it, the same way a test framework plugin would use the registry.

use helpers_namespace::session;
use helpers_namespace::test_utils::SessionGuard;
use helpers_namespace::{HelpersError, Namespace};

fn foo(bar: bool) -> bool {
    bar
}

mod other {
    pub fn foo(_bar: bool) -> bool {
        false
    }
}

/// Stands in for a setup file that registers helpers
fn setup_file<F>(register: F)
where
    F: FnOnce(&Namespace) -> Result<(), HelpersError>,
{
    let helpers = session::require_helpers().expect("registry should be attached");
    register(&helpers).expect("setup registration should succeed");
}

#[test]
fn test_namespace() {
    let _guard = SessionGuard::acquire();
    setup_file(|helpers| helpers.register(foo).map(|_| ()));

    let helpers = session::helpers().unwrap();
    let value: bool = helpers.get("foo").unwrap().call((true,)).unwrap();
    assert!(value);
}

#[test]
fn test_nested_namespace() {
    let _guard = SessionGuard::acquire();
    setup_file(|helpers| helpers.lookup("foo.bar")?.register(foo).map(|_| ()));

    let helpers = session::helpers().unwrap();
    let value: bool = helpers
        .get("foo")
        .unwrap()
        .get("bar")
        .unwrap()
        .get("foo")
        .unwrap()
        .call((true,))
        .unwrap();
    assert!(value);
}

#[test]
fn test_unregistered_namespace() {
    let _guard = SessionGuard::acquire();
    let helpers = session::helpers().unwrap();

    let error = helpers
        .get("foo")
        .unwrap()
        .call::<_, bool>((true,))
        .unwrap_err();
    assert!(matches!(error, HelpersError::UnregisteredHelper { .. }));
    assert!(error
        .to_string()
        .contains("the helper being called was not registered"));
}

#[test]
fn test_duplicate_registration() {
    let guard = SessionGuard::acquire();
    let helpers = guard.helpers();
    helpers_namespace::register!(helpers, foo).unwrap();

    let error = helpers_namespace::register!(helpers, other::foo)
        .map(|_| ())
        .unwrap_err();
    assert!(matches!(error, HelpersError::DuplicateName { ref name, .. } if name == "foo"));
    assert!(error.to_string().contains("foo"));

    // The first registration still answers
    let value: bool = helpers.get("foo").unwrap().call((true,)).unwrap();
    assert!(value);
}

#[test]
fn test_custom_name_registration() {
    let guard = SessionGuard::acquire();
    let helpers = guard.helpers();

    let original = helpers.named("jump").register(foo).unwrap();

    let value: bool = helpers.get("jump").unwrap().call((true,)).unwrap();
    assert!(value);
    assert!(original(true));
    assert!(!original(false));
}

#[test]
fn test_registering_through_a_helper() {
    let guard = SessionGuard::acquire();
    let helpers = guard.helpers();
    helpers.register(foo).unwrap();

    let error = helpers
        .get("foo")
        .unwrap()
        .register_as("foo", other::foo)
        .map(|_| ())
        .unwrap_err();
    assert!(matches!(error, HelpersError::LeafRegistration { .. }));
    assert!(error.to_string().contains("use a namespace instead"));
}

#[test]
fn test_nested_name_collides_with_helper() {
    let guard = SessionGuard::acquire();
    let helpers = guard.helpers();
    helpers.register(foo).unwrap();

    // `foo` is a helper, so it cannot become a namespace
    let error = helpers
        .register_at("foo.bar.foo", foo)
        .map(|_| ())
        .unwrap_err();
    assert!(matches!(error, HelpersError::NotANamespace { .. }));

    let error = helpers.register_at("foo.foo", foo).map(|_| ()).unwrap_err();
    assert!(matches!(error, HelpersError::LeafRegistration { .. }));
}

#[test]
fn test_helpers_survive_between_lookups() {
    let guard = SessionGuard::acquire();
    guard
        .helpers()
        .register_as("add", |a: i64, b: i64| a + b)
        .unwrap();

    for (a, b) in [(1, 2), (-5, 5), (100, 23)] {
        let sum: i64 = session::require_helpers()
            .unwrap()
            .lookup("add")
            .unwrap()
            .call((a, b))
            .unwrap();
        assert_eq!(sum, a + b);
    }
}

#[test]
fn test_require_helpers_without_session() {
    let _guard = SessionGuard::acquire();
    session::detach();

    assert_eq!(
        session::require_helpers().map(|_| ()),
        Err(HelpersError::NotAttached)
    );
}

#[test]
fn test_describe_after_setup() {
    let guard = SessionGuard::acquire();
    let helpers = guard.helpers();
    helpers.register_at("db.users.create", |name: String| name).unwrap();

    let description = helpers.describe();
    assert!(description.contains("\"db\""));
    assert!(description.contains("\"users\""));
    assert!(description.contains("\"create\": Helper(fn("));

    let create = helpers.lookup("db.users.create").unwrap();
    let create = create.as_helper().unwrap();
    assert!(create.accepts::<(String,), String>());
    assert!(!create.accepts::<(&'static str,), String>());
}

#[test]
fn test_register_macro_uses_the_written_name() {
    let guard = SessionGuard::acquire();
    let helpers = guard.helpers();

    let original = helpers_namespace::register!(helpers, other::foo).unwrap();
    assert!(!original(true));
    assert!(helpers.contains("foo"));
    assert!(!helpers.contains("other"));

    helpers_namespace::register!(helpers.get("nested").unwrap(), foo).unwrap();
    let value: bool = helpers.lookup("nested.foo").unwrap().call((true,)).unwrap();
    assert!(value);
}
