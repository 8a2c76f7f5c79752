//! Pattern and keyword library for PII detection

use anyhow::{Context, Result};
use fancy_regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// One label's definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct LabelDefinition {
    /// Value-extraction pattern (fancy-regex syntax, lookaround allowed)
    pub pattern: String,
    /// Keyword aliases that gate this label
    pub keywords: Vec<String>,
}

/// Raw library container, as parsed from TOML
#[derive(Debug, Deserialize)]
pub struct PatternLibrary {
    labels: BTreeMap<String, LabelDefinition>,
}

impl PatternLibrary {
    /// Parse a library from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;
        if library.labels.is_empty() {
            anyhow::bail!("Pattern library defines no labels");
        }
        Ok(library)
    }

    /// Parse a library from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;
        Self::from_toml(&content)
    }

    /// The embedded default library
    pub fn default_library() -> Result<Self> {
        let default_toml = include_str!("../../patterns/pii_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// Label names in deterministic (sorted) order
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }

    /// Keyword aliases keyed by label
    pub fn alias_table(&self) -> BTreeMap<String, Vec<String>> {
        self.labels
            .iter()
            .map(|(label, def)| (label.clone(), def.keywords.clone()))
            .collect()
    }
}

/// Compiled value-extraction patterns keyed by label
///
/// Patterns are compiled case-insensitively, matching how the value
/// extractors are expected to behave for ids written in mixed case.
pub struct PatternRegistry {
    patterns: BTreeMap<String, Regex>,
}

impl PatternRegistry {
    /// Compile a registry from a parsed library
    pub fn from_library(library: &PatternLibrary) -> Result<Self> {
        let mut patterns = BTreeMap::new();
        for (label, def) in &library.labels {
            let regex = Regex::new(&format!("(?i){}", def.pattern))
                .with_context(|| format!("Invalid regex for label '{label}': {}", def.pattern))?;
            patterns.insert(label.clone(), regex);
        }
        Ok(Self { patterns })
    }

    /// Compile a registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        Self::from_library(&PatternLibrary::from_toml(content)?)
    }

    /// Compile the embedded default registry
    pub fn default_patterns() -> Result<Self> {
        Self::from_library(&PatternLibrary::default_library()?)
    }

    /// The pattern for a label, if one is registered
    pub fn pattern_for(&self, label: &str) -> Option<&Regex> {
        self.patterns.get(label)
    }

    /// Whether a label has an associated pattern
    pub fn has_pattern(&self, label: &str) -> bool {
        self.patterns.contains_key(label)
    }

    /// Number of registered patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
