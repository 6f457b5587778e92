//! Permission checks.

use std::collections::BTreeSet;
use std::fmt;

/// Permission to browse directory listings.
pub const BROWSER_VIEW: &str = "BROWSER_VIEW";
/// Permission to read file content.
pub const FILE_VIEW: &str = "FILE_VIEW";

/// Repository location a permission is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub path: String,
    pub revision: Option<String>,
}

impl Resource {
    #[must_use]
    pub fn new(path: impl Into<String>, revision: Option<&str>) -> Self {
        Self {
            path: path.into(),
            revision: revision.map(str::to_owned),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source:/{}", self.path)?;
        if let Some(rev) = &self.revision {
            write!(f, "@{rev}")?;
        }
        Ok(())
    }
}

/// The current principal lacks a permission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{action} privileges are required to perform this operation on {resource}")]
pub struct PermissionDenied {
    pub action: String,
    pub resource: Resource,
}

/// Permission check bound to the current principal.
pub trait PermissionCheck: Send + Sync {
    /// Succeed if `action` is allowed on `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionDenied`] otherwise.
    fn require(&self, action: &str, resource: &Resource) -> Result<(), PermissionDenied>;
}

/// Grants a fixed set of actions on every resource.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    granted: BTreeSet<String>,
}

impl StaticPermissions {
    /// Grant `actions`.
    pub fn new<I, S>(actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: actions.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `action` is granted.
    #[must_use]
    pub fn grants(&self, action: &str) -> bool {
        self.granted.contains(action)
    }
}

impl PermissionCheck for StaticPermissions {
    fn require(&self, action: &str, resource: &Resource) -> Result<(), PermissionDenied> {
        if self.grants(action) {
            Ok(())
        } else {
            Err(PermissionDenied {
                action: action.to_owned(),
                resource: resource.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_permissions() {
        let perm = StaticPermissions::new([BROWSER_VIEW]);
        let resource = Resource::new("docs", Some("42"));

        assert!(perm.require(BROWSER_VIEW, &resource).is_ok());
        let err = perm.require(FILE_VIEW, &resource).unwrap_err();
        assert_eq!(err.action, FILE_VIEW);
        assert_eq!(
            err.to_string(),
            "FILE_VIEW privileges are required to perform this operation on source:/docs@42"
        );
    }

    #[test]
    fn test_resource_display_without_revision() {
        assert_eq!(Resource::new("", None).to_string(), "source:/");
    }
}
