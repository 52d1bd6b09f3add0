//! Test helpers: a provider builder that hands out scripted street graphs.

use super::*;
use camino::Utf8PathBuf;
use parkzone_core::GraphProvider;
use parkzone_core::test_support::ScriptedGraphProvider;
use parkzone_data::OverpassConfig;
use std::cell::RefCell;
use tempfile::TempDir;

/// Builder that yields one pre-scripted provider and records the
/// Overpass configuration it was asked to build for.
#[derive(Debug, Default)]
pub(super) struct ScriptedProviderBuilder {
    provider: RefCell<Option<ScriptedGraphProvider>>,
    requested: RefCell<Option<OverpassConfig>>,
}

impl ScriptedProviderBuilder {
    pub(super) fn new(provider: ScriptedGraphProvider) -> Self {
        Self {
            provider: RefCell::new(Some(provider)),
            requested: RefCell::new(None),
        }
    }

    pub(super) fn requested(&self) -> Option<OverpassConfig> {
        self.requested.borrow().clone()
    }
}

impl ProviderBuilder for ScriptedProviderBuilder {
    fn build(&self, config: &OverpassConfig) -> Result<Box<dyn GraphProvider>, CliError> {
        self.requested.replace(Some(config.clone()));
        let provider = self
            .provider
            .borrow_mut()
            .take()
            .unwrap_or_else(|| panic!("scripted provider already consumed"));
        Ok(Box::new(provider))
    }
}

/// Temporary directory addressed through UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}
