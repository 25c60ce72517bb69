//! Parser configuration.

use bitflags::bitflags;
use plait_common::{ScriptTarget, SourceType};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

bitflags! {
    /// Syntax extensions layered onto the core grammar.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Plugins: u8 {
        const JSX = 1 << 0;
        /// Nominal type annotations.
        const TYPESCRIPT = 1 << 1;
        /// Structural type annotations.
        const FLOW = 1 << 2;
    }
}

const PLUGIN_NAMES: &[(&str, Plugins)] = &[
    ("jsx", Plugins::JSX),
    ("typescript", Plugins::TYPESCRIPT),
    ("flow", Plugins::FLOW),
];

impl Plugins {
    /// Plugin set from a name (`jsx`, `typescript`, `flow`).
    #[must_use]
    pub fn from_plugin_name(name: &str) -> Option<Self> {
        PLUGIN_NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, plugin)| *plugin)
    }

    /// Names of the enabled plugins, in registration order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        PLUGIN_NAMES
            .iter()
            .filter(move |(_, plugin)| self.contains(*plugin))
            .map(|(name, _)| *name)
    }
}

impl Serialize for Plugins {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let names: Vec<&str> = self.names().collect();
        let mut seq = serializer.serialize_seq(Some(names.len()))?;
        for name in names {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Plugins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        names.iter().try_fold(Plugins::empty(), |acc, name| {
            Plugins::from_plugin_name(name)
                .map(|plugin| acc | plugin)
                .ok_or_else(|| de::Error::custom(format!("unknown plugin '{name}'")))
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("the 'typescript' and 'flow' plugins cannot be enabled together")]
    ConflictingTypePlugins,
}

/// Options for one parse.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    pub source_type: SourceType,
    pub target: ScriptTarget,
    pub plugins: Plugins,
    /// Collect every consumed token into the output.
    pub tokens: bool,
    /// Force strict mode on or off. Unset means strict for modules and for
    /// scripts with a `"use strict"` directive.
    pub strict_mode: Option<bool>,
    pub allow_return_outside_function: bool,
    /// File name reported in diagnostics.
    pub source_filename: Option<String>,
}

impl ParserOptions {
    #[must_use]
    pub fn module() -> Self {
        Self {
            source_type: SourceType::Module,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_plugins(mut self, plugins: Plugins) -> Self {
        self.plugins |= plugins;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: ScriptTarget) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    #[must_use]
    pub fn with_tokens(mut self, tokens: bool) -> Self {
        self.tokens = tokens;
        self
    }

    #[inline]
    #[must_use]
    pub fn has_plugin(&self, plugin: Plugins) -> bool {
        self.plugins.contains(plugin)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.plugins.contains(Plugins::TYPESCRIPT | Plugins::FLOW) {
            return Err(OptionsError::ConflictingTypePlugins);
        }
        Ok(())
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        self.source_filename.as_deref().unwrap_or("input")
    }
}
