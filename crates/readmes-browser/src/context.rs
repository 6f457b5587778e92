//! Per-request page context.

use readmes_render::AssetSink;
use readmes_repo::DirEntry;

use crate::permission::{PermissionCheck, Resource};

/// Kind of page being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Repository browser: a directory listing or a single file view.
    Browser,
    /// Any other page.
    Other,
}

/// Data describing the browser page being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageData {
    /// Repository path being viewed.
    pub path: String,
    /// Requested revision; `None` means the latest.
    pub revision: Option<String>,
    /// Directory entries, present only for directory listings.
    pub listing: Option<Vec<DirEntry>>,
}

impl PageData {
    /// Data for a directory listing page.
    #[must_use]
    pub fn directory(
        path: impl Into<String>,
        revision: Option<&str>,
        listing: Vec<DirEntry>,
    ) -> Self {
        Self {
            path: path.into(),
            revision: revision.map(str::to_owned),
            listing: Some(listing),
        }
    }

    /// Data for a single file view.
    #[must_use]
    pub fn file(path: impl Into<String>, revision: Option<&str>) -> Self {
        Self {
            path: path.into(),
            revision: revision.map(str::to_owned),
            listing: None,
        }
    }

    /// Whether this page is a directory listing.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.listing.is_some()
    }

    /// Resource permissions are checked against.
    #[must_use]
    pub fn resource(&self) -> Resource {
        Resource::new(self.path.clone(), self.revision.as_deref())
    }
}

/// Request-scoped capabilities: the principal's permissions and the asset
/// registrations for the response.
pub struct RequestContext<'a> {
    pub perm: &'a dyn PermissionCheck,
    pub assets: &'a mut dyn AssetSink,
}

impl<'a> RequestContext<'a> {
    #[must_use]
    pub fn new(perm: &'a dyn PermissionCheck, assets: &'a mut dyn AssetSink) -> Self {
        Self { perm, assets }
    }
}
