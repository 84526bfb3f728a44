//! Global platform registry for looking up platform definitions.

use std::sync::RwLock;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use super::Platform;
use super::definition::PlatformDefinition;
use super::vendors;
use crate::error::{PlatformError, Result};

/// Global platform registry.
static REGISTRY: Lazy<RwLock<PlatformRegistry>> = Lazy::new(|| {
    let mut registry = PlatformRegistry::new();
    registry.register_builtin_platforms();
    RwLock::new(registry)
});

/// Registry for platform definitions, keyed by platform.
#[derive(Debug, Default)]
pub struct PlatformRegistry {
    platforms: IndexMap<Platform, PlatformDefinition>,
}

impl PlatformRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            platforms: IndexMap::new(),
        }
    }

    /// Get the global registry.
    pub fn global() -> &'static RwLock<PlatformRegistry> {
        &REGISTRY
    }

    /// Clone a definition out of the global registry.
    pub fn lookup(platform: Platform) -> Result<PlatformDefinition> {
        let registry = REGISTRY
            .read()
            .map_err(|_| PlatformError::RegistryPoisoned)?;
        registry.get(platform).cloned().ok_or_else(|| {
            PlatformError::UnknownPlatform {
                name: platform.name().to_string(),
            }
            .into()
        })
    }

    /// Register built-in platforms.
    fn register_builtin_platforms(&mut self) {
        for def in [
            vendors::checkpoint::gaia_clish(),
            vendors::checkpoint::splat_cpshell(),
            vendors::checkpoint::expert_shell(),
            vendors::checkpoint::ipso(),
            vendors::crossbeam::cpm(),
            vendors::crossbeam::apm(),
        ] {
            self.platforms.insert(def.platform, def);
        }
    }

    /// Register a platform definition.
    pub fn register(&mut self, definition: PlatformDefinition) -> Result<()> {
        if self.platforms.contains_key(&definition.platform) {
            return Err(PlatformError::AlreadyRegistered {
                name: definition.platform.name().to_string(),
            }
            .into());
        }
        self.platforms.insert(definition.platform, definition);
        Ok(())
    }

    /// Replace a definition, returning the previous one.
    pub fn replace(&mut self, definition: PlatformDefinition) -> Option<PlatformDefinition> {
        self.platforms.insert(definition.platform, definition)
    }

    /// Get a platform definition.
    pub fn get(&self, platform: Platform) -> Option<&PlatformDefinition> {
        self.platforms.get(&platform)
    }

    /// Check if a platform is registered.
    pub fn contains(&self, platform: Platform) -> bool {
        self.platforms.contains_key(&platform)
    }

    /// List all registered platforms.
    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.platforms.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_builtin_platforms() {
        let registry = PlatformRegistry::global().read().unwrap();
        for platform in [
            Platform::GaiaClish,
            Platform::SplatCpShell,
            Platform::ExpertShell,
            Platform::Ipso,
            Platform::CrossbeamCpm,
            Platform::CrossbeamApm,
        ] {
            assert!(registry.contains(platform), "missing {platform}");
        }
        assert!(!registry.contains(Platform::Unclassified));
    }

    #[test]
    fn test_lookup_unclassified_fails() {
        let err = PlatformRegistry::lookup(Platform::Unclassified).unwrap_err();
        assert!(matches!(
            err,
            Error::Platform(PlatformError::UnknownPlatform { .. })
        ));
    }

    #[test]
    fn test_register_duplicate() {
        let mut registry = PlatformRegistry::new();
        registry
            .register(PlatformDefinition::new(Platform::Ipso))
            .unwrap();
        assert!(
            registry
                .register(PlatformDefinition::new(Platform::Ipso))
                .is_err()
        );

        let old = registry.replace(
            PlatformDefinition::new(Platform::Ipso).with_failure_pattern("denied"),
        );
        assert!(old.is_some());
        assert_eq!(
            registry.get(Platform::Ipso).unwrap().failed_when_contains,
            vec!["denied".to_string()]
        );
    }
}
