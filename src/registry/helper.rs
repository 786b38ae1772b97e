//! # Helper Functions
//!
//! The leaves of the helpers tree: registered functions wrapped with their
//! name, path and signature.
//!
//! ## Overview
//!
//! Helpers accept any number of `'static` arguments and return any `'static`
//! value. The registry never looks at either; it stores the function behind a
//! type-erased handle and only checks, at call time, that the caller asks for
//! the same argument tuple and return type the helper was registered with.
//!
//! Arguments are passed as a tuple:
//!
//! ```rust
//! use helpers_namespace::Namespace;
//!
//! fn add(a: i32, b: i32) -> i32 {
//!     a + b
//! }
//!
//! # fn main() -> Result<(), helpers_namespace::HelpersError> {
//! let helpers = Namespace::root();
//! helpers.register_as("add", add)?;
//!
//! let sum: i32 = helpers.get("add")?.call((2, 3))?;
//! assert_eq!(sum, 5);
//! # Ok(())
//! # }
//! ```

use super::path::HelperPath;
use crate::error::{HelpersError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A function that can be registered as a helper.
///
/// Implemented for every `Fn(A1, .., An) -> R` up to eight arguments, where
/// `Args` is the tuple `(A1, .., An)`.
pub trait HelperFn<Args, R>: Send + Sync + 'static {
    fn invoke(&self, args: Args) -> R;
}

macro_rules! impl_helper_fn {
    ($($arg:ident),*) => {
        impl<Func, R, $($arg,)*> HelperFn<($($arg,)*), R> for Func
        where
            Func: Fn($($arg),*) -> R + Send + Sync + 'static,
        {
            #[allow(non_snake_case)]
            #[inline]
            fn invoke(&self, ($($arg,)*): ($($arg,)*)) -> R {
                (self)($($arg),*)
            }
        }
    };
}

impl_helper_fn!();
impl_helper_fn!(A1);
impl_helper_fn!(A1, A2);
impl_helper_fn!(A1, A2, A3);
impl_helper_fn!(A1, A2, A3, A4);
impl_helper_fn!(A1, A2, A3, A4, A5);
impl_helper_fn!(A1, A2, A3, A4, A5, A6);
impl_helper_fn!(A1, A2, A3, A4, A5, A6, A7);
impl_helper_fn!(A1, A2, A3, A4, A5, A6, A7, A8);

type ErasedHelper<Args, R> = Arc<dyn HelperFn<Args, R>>;

/// Descriptive data about a registered helper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperMetadata {
    pub name: String,
    pub path: String,
    pub signature: String,
    pub registered_at: DateTime<Utc>,
}

struct HelperInner {
    path: HelperPath,
    signature: String,
    registered_at: DateTime<Utc>,
    func: Box<dyn Any + Send + Sync>,
}

/// A registered helper function.
///
/// Cloning a `Helper` is cheap and yields another handle to the same helper.
/// Helpers are terminal: they cannot hold further registrations.
#[derive(Clone)]
pub struct Helper {
    inner: Arc<HelperInner>,
}

impl Helper {
    pub(crate) fn new<F, Args, R>(path: HelperPath, func: F) -> Self
    where
        F: HelperFn<Args, R>,
        Args: 'static,
        R: 'static,
    {
        let erased: ErasedHelper<Args, R> = Arc::new(func);
        Self {
            inner: Arc::new(HelperInner {
                path,
                signature: signature_of::<Args, R>(),
                registered_at: Utc::now(),
                func: Box::new(erased),
            }),
        }
    }

    /// Call the helper with `args`, returning its result unchanged.
    ///
    /// Fails with [`HelpersError::SignatureMismatch`] when `Args`/`R` differ
    /// from the registered signature. Panics raised by the helper propagate
    /// untouched.
    #[inline]
    pub fn call<Args, R>(&self, args: Args) -> Result<R>
    where
        Args: 'static,
        R: 'static,
    {
        let func = self
            .inner
            .func
            .downcast_ref::<ErasedHelper<Args, R>>()
            .ok_or_else(|| HelpersError::SignatureMismatch {
                helper: self.inner.path.to_string(),
                expected: self.inner.signature.clone(),
                requested: signature_of::<Args, R>(),
            })?;
        Ok(func.invoke(args))
    }

    /// True when the helper can be called with `Args` and returns `R`
    pub fn accepts<Args: 'static, R: 'static>(&self) -> bool {
        self.inner.func.is::<ErasedHelper<Args, R>>()
    }

    /// Name the helper is bound under in its namespace
    pub fn name(&self) -> &str {
        self.inner.path.name().unwrap_or_default()
    }

    pub fn path(&self) -> &HelperPath {
        &self.inner.path
    }

    pub fn signature(&self) -> &str {
        &self.inner.signature
    }

    pub fn metadata(&self) -> HelperMetadata {
        HelperMetadata {
            name: self.name().to_string(),
            path: self.inner.path.to_string(),
            signature: self.inner.signature.clone(),
            registered_at: self.inner.registered_at,
        }
    }

    /// True when both handles refer to the same registered helper
    pub fn ptr_eq(this: &Helper, other: &Helper) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }
}

impl fmt::Debug for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Helper({}: {})", self.inner.path, self.inner.signature)
    }
}

/// Render `fn(A, B) -> R` for an argument tuple and return type
fn signature_of<Args, R>() -> String {
    let args = type_name::<Args>();
    let args = args.strip_suffix(",)").map_or_else(|| args.to_string(), |a| format!("{a})"));
    format!("fn{} -> {}", args, type_name::<R>())
}

/// Best-effort declared name of a function item, derived from its type name.
///
/// `my_crate::fixtures::make_user` usually yields `make_user`, but
/// `type_name` output is unspecified and may differ between compilers;
/// [`crate::register!`] is the stable route. Closures and function pointers
/// carry no declared name and fail with [`HelpersError::AnonymousHelper`].
pub(crate) fn declared_name<F>() -> Result<String> {
    let full = type_name::<F>();
    let stripped = strip_generics(full);
    let name = stripped.rsplit("::").next().unwrap_or_default();

    let is_identifier = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    if !is_identifier {
        return Err(HelpersError::AnonymousHelper {
            type_name: full.to_string(),
        });
    }
    Ok(name.to_string())
}

fn strip_generics(type_name: &str) -> String {
    let mut depth = 0usize;
    type_name
        .chars()
        .filter(|c| match c {
            '<' => {
                depth += 1;
                false
            }
            '>' => {
                depth = depth.saturating_sub(1);
                false
            }
            _ => depth == 0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(value: bool) -> bool {
        value
    }

    fn concat(a: String, b: String, separator: char) -> String {
        format!("{a}{separator}{b}")
    }

    fn identity<T>(value: T) -> T {
        value
    }

    fn answer() -> u32 {
        42
    }

    fn helper_at<F, Args, R>(path: &str, func: F) -> Helper
    where
        F: HelperFn<Args, R>,
        Args: 'static,
        R: 'static,
    {
        Helper::new(path.parse().unwrap(), func)
    }

    #[test]
    fn test_call_forwards_arguments() {
        let helper = helper_at("echo", echo);
        assert!(helper.call::<_, bool>((true,)).unwrap());
        assert!(!helper.call::<_, bool>((false,)).unwrap());
    }

    #[test]
    fn test_call_multiple_arguments() {
        let helper = helper_at("concat", concat);
        let joined: String = helper
            .call(("a".to_string(), "b".to_string(), '-'))
            .unwrap();
        assert_eq!(joined, "a-b");
    }

    #[test]
    fn test_call_without_arguments() {
        let helper = helper_at("answer", answer);
        let value: u32 = helper.call(()).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_signature_mismatch() {
        let helper = helper_at("echo", echo);
        let result = helper.call::<_, bool>((1_i32,));
        match result {
            Err(HelpersError::SignatureMismatch {
                helper,
                expected,
                requested,
            }) => {
                assert_eq!(helper, "helpers.echo");
                assert!(expected.starts_with("fn("));
                assert_ne!(expected, requested);
            }
            other => panic!("expected signature mismatch, got {other:?}"),
        }
        assert!(helper.accepts::<(bool,), bool>());
        assert!(!helper.accepts::<(i32,), bool>());
        assert!(!helper.accepts::<(bool,), i32>());
    }

    #[test]
    fn test_helper_errors_pass_through() {
        let helper = helper_at("fail", |code: i32| -> std::result::Result<(), String> {
            Err(format!("code {code}"))
        });
        let inner: std::result::Result<(), String> = helper.call((7,)).unwrap();
        assert_eq!(inner, Err("code 7".to_string()));
    }

    #[test]
    fn test_declared_name_of_function_items() {
        assert_eq!(declared_name_of(echo), "echo");
        assert_eq!(declared_name_of(identity::<u8>), "identity");
    }

    #[test]
    fn test_closures_have_no_declared_name() {
        let closure = |x: i32| x;
        assert!(matches!(
            declared_name_for(&closure),
            Err(HelpersError::AnonymousHelper { .. })
        ));
        let pointer: fn(bool) -> bool = echo;
        assert!(matches!(
            declared_name_for(&pointer),
            Err(HelpersError::AnonymousHelper { .. })
        ));
    }

    #[test]
    fn test_metadata() {
        let helper = helper_at("fixtures.echo", echo);
        let metadata = helper.metadata();
        assert_eq!(metadata.name, "echo");
        assert_eq!(metadata.path, "helpers.fixtures.echo");
        assert_eq!(metadata.signature, helper.signature());
        assert!(metadata.signature.contains(" -> "));
        assert_eq!(helper.name(), "echo");
    }

    fn declared_name_of<F>(_: F) -> String {
        declared_name::<F>().unwrap()
    }

    fn declared_name_for<F>(_: &F) -> Result<String> {
        declared_name::<F>()
    }
}
