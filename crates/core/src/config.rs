//! Resolver configuration.

use crate::error::{ResolveError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ROOT_TYPE: &str = "java.lang.Object";
pub const DEFAULT_RECORD_BASE_TYPE: &str = "java.lang.Record";
pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 64;

/// When a record gets a synthesized canonical constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalConstructorPolicy {
    /// Always append one, even next to an explicit all-components constructor.
    #[default]
    Always,
    /// Skip it when an explicit constructor already takes every component,
    /// in order, with parameter types resolving to the component types.
    SkipWhenDeclared,
}

impl std::str::FromStr for CanonicalConstructorPolicy {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "always" => Ok(Self::Always),
            "skip_when_declared" | "skip-when-declared" => Ok(Self::SkipWhenDeclared),
            other => Err(ResolveError::Config(format!(
                "unknown canonical constructor policy: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Universal root type; it has no ancestors.
    pub root_type: String,
    /// Supertype every record implicitly extends.
    pub record_base_type: String,
    /// Bound on transitive ancestor walks.
    pub max_ancestor_depth: usize,
    pub canonical_constructor_policy: CanonicalConstructorPolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_type: DEFAULT_ROOT_TYPE.to_string(),
            record_base_type: DEFAULT_RECORD_BASE_TYPE.to_string(),
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
            canonical_constructor_policy: CanonicalConstructorPolicy::default(),
        }
    }
}

impl ResolverConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ResolverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Applies `SYMSCOPE_MAX_ANCESTOR_DEPTH` and `SYMSCOPE_CANONICAL_CONSTRUCTOR`.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(
            std::env::var("SYMSCOPE_MAX_ANCESTOR_DEPTH").ok().as_deref(),
            std::env::var("SYMSCOPE_CANONICAL_CONSTRUCTOR").ok().as_deref(),
        )
    }

    fn with_overrides(mut self, depth: Option<&str>, policy: Option<&str>) -> Result<Self> {
        if let Some(depth) = depth {
            self.max_ancestor_depth = depth.trim().parse().map_err(|_| {
                ResolveError::Config(format!("invalid max ancestor depth: {}", depth))
            })?;
        }
        if let Some(policy) = policy {
            self.canonical_constructor_policy = policy.trim().parse()?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn with_canonical_constructor_policy(mut self, policy: CanonicalConstructorPolicy) -> Self {
        self.canonical_constructor_policy = policy;
        self
    }

    pub fn with_max_ancestor_depth(mut self, depth: usize) -> Self {
        self.max_ancestor_depth = depth;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_ancestor_depth == 0 {
            return Err(ResolveError::Config(
                "max_ancestor_depth must be at least 1".to_string(),
            ));
        }
        if self.root_type.is_empty() || self.record_base_type.is_empty() {
            return Err(ResolveError::Config(
                "root and record base type names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
