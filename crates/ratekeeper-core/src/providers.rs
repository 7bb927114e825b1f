//! App version discovery.

/// Provides the current app version string.
///
/// The value must be stable within a process run: the version-scoped
/// conditions and the ledger's version stamp both key off it.
pub trait AppVersionProvider {
    fn app_version(&self) -> String;
}

/// Fixed version string supplied by the host, typically its own
/// `CARGO_PKG_VERSION`.
#[derive(Debug, Clone)]
pub struct StaticAppVersionProvider {
    version: String,
}

impl StaticAppVersionProvider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

impl AppVersionProvider for StaticAppVersionProvider {
    fn app_version(&self) -> String {
        self.version.clone()
    }
}
