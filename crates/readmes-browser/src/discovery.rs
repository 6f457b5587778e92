//! README candidate discovery.

use readmes_repo::DirEntry;

/// Name prefix that marks a README candidate.
pub const DEFAULT_README_PREFIX: &str = "readme";

/// Filters a directory listing down to README candidates.
///
/// A candidate is a non-directory entry whose name starts with the prefix,
/// compared case-insensitively. Listing order is kept and subdirectories are
/// never entered.
#[derive(Debug, Clone)]
pub struct ReadmeDiscovery {
    prefix: String,
}

impl ReadmeDiscovery {
    /// Create a discovery with a custom name prefix.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_lowercase(),
        }
    }

    /// Whether `entry` is a README candidate.
    #[must_use]
    pub fn is_candidate(&self, entry: &DirEntry) -> bool {
        !entry.is_dir && entry.name.to_lowercase().starts_with(&self.prefix)
    }

    /// Candidates from `entries`, in listing order.
    #[must_use]
    pub fn discover<'a>(&self, entries: &'a [DirEntry]) -> Vec<&'a DirEntry> {
        entries.iter().filter(|e| self.is_candidate(e)).collect()
    }
}

impl Default for ReadmeDiscovery {
    fn default() -> Self {
        Self::new(DEFAULT_README_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn names<'a>(entries: &[&'a DirEntry]) -> Vec<&'a str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_discover_keeps_listing_order() {
        let listing = vec![
            DirEntry::file("README.md"),
            DirEntry::dir("docs"),
            DirEntry::file("readme.wiki"),
        ];

        let found = ReadmeDiscovery::default().discover(&listing);
        assert_eq!(names(&found), ["README.md", "readme.wiki"]);
    }

    #[test]
    fn test_discover_skips_directories_and_other_files() {
        let listing = vec![
            DirEntry::dir("readme-assets"),
            DirEntry::file("Cargo.toml"),
            DirEntry::file("my-readme.txt"),
            DirEntry::file("ReadMe"),
            DirEntry::file("README_zh.rst"),
        ];

        let found = ReadmeDiscovery::default().discover(&listing);
        assert_eq!(names(&found), ["ReadMe", "README_zh.rst"]);
    }

    #[test]
    fn test_custom_prefix() {
        let listing = vec![DirEntry::file("INSTALL.md"), DirEntry::file("README")];

        let found = ReadmeDiscovery::new("Install").discover(&listing);
        assert_eq!(names(&found), ["INSTALL.md"]);
    }

    #[test]
    fn test_nested_entries_match_by_name() {
        let entry = DirEntry::file("readme-dir/notes.txt");
        assert!(!ReadmeDiscovery::default().is_candidate(&entry));

        let entry = DirEntry::file("docs/README");
        assert!(ReadmeDiscovery::default().is_candidate(&entry));
    }
}
