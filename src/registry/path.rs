//! # Helper Paths
//!
//! Validated dotted paths (`foo.bar.baz`) addressing nodes of the helpers tree,
//! relative to the root namespace.

use crate::constants::{is_reserved, PATH_SEPARATOR, ROOT_NAME};
use crate::error::{HelpersError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sequence of names from the root namespace down to a node.
///
/// The empty path addresses the root itself. Every segment has passed
/// [`validate_name`]. Serialized as the relative dotted form (`"foo.bar"`);
/// deserializing goes through [`FromStr`] and so validates as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HelperPath {
    segments: Vec<String>,
}

impl HelperPath {
    /// The path of the root namespace
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from already-split segments, validating each one
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = segments
            .into_iter()
            .map(|segment| {
                let segment = segment.as_ref();
                validate_name(segment)?;
                Ok(segment.to_string())
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { segments })
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, or `None` for the root
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Path of the enclosing namespace, or `None` for the root
    pub fn parent(&self) -> Option<HelperPath> {
        let (_, parent) = self.segments.split_last()?;
        Some(Self {
            segments: parent.to_vec(),
        })
    }

    /// Path of a direct child. `name` is expected to be validated by the caller.
    pub(crate) fn child(&self, name: &str) -> HelperPath {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(name.to_string());
        Self { segments }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.segments.iter()
    }

    /// Dotted form relative to the root, without the root label. The root is
    /// the empty string. Parses back to the same path.
    pub fn dotted(&self) -> String {
        let separator = PATH_SEPARATOR.to_string();
        self.segments.join(separator.as_str())
    }
}

impl FromStr for HelperPath {
    type Err = HelpersError;

    /// Parse a dotted path. The empty string is the root.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        Self::from_segments(s.split(PATH_SEPARATOR))
    }
}

impl TryFrom<String> for HelperPath {
    type Error = HelpersError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<HelperPath> for String {
    fn from(path: HelperPath) -> Self {
        path.dotted()
    }
}

impl fmt::Display for HelperPath {
    /// Renders the path anchored at the root label, e.g. `helpers.foo.bar`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT_NAME)?;
        for segment in &self.segments {
            write!(f, "{PATH_SEPARATOR}{segment}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a HelperPath {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Check that `name` may be bound inside a namespace.
///
/// Reserved names fail with [`HelpersError::ReservedName`]; empty names and
/// names containing the path separator or whitespace fail with
/// [`HelpersError::InvalidName`].
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains(PATH_SEPARATOR) {
        "name contains the path separator"
    } else if name.chars().any(char::is_whitespace) {
        "name contains whitespace"
    } else if is_reserved(name) {
        return Err(HelpersError::ReservedName {
            name: name.to_string(),
        });
    } else {
        return Ok(());
    };

    Err(HelpersError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}
