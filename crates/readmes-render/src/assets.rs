//! Per-request asset registration.

/// Receiver of stylesheet and script registrations.
///
/// Names are logical asset names (e.g., `readme/readme.js`); the host maps
/// them to URLs. Registering the same name twice has no further effect.
pub trait AssetSink {
    /// Register a stylesheet.
    fn add_stylesheet(&mut self, name: &str);

    /// Register a script.
    fn add_script(&mut self, name: &str);
}

/// Assets registered while rendering one page, in registration order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RequestAssets {
    stylesheets: Vec<String>,
    scripts: Vec<String>,
}

impl RequestAssets {
    /// Create an empty registration set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered stylesheets.
    #[must_use]
    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    /// Registered scripts.
    #[must_use]
    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }
}

impl AssetSink for RequestAssets {
    fn add_stylesheet(&mut self, name: &str) {
        if !self.stylesheets.iter().any(|s| s == name) {
            self.stylesheets.push(name.to_owned());
        }
    }

    fn add_script(&mut self, name: &str) {
        if !self.scripts.iter().any(|s| s == name) {
            self.scripts.push(name.to_owned());
        }
    }
}
