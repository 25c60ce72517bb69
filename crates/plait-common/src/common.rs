//! Dialect-independent settings shared by the scanner and the parser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ECMAScript edition whose syntax the parser accepts.
///
/// Ordered by release, so feature gates compare with `>=`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ScriptTarget {
    ES5,
    ES2015,
    ES2016,
    ES2017,
    ES2018,
    ES2019,
    ES2020,
    ES2021,
    ES2022,
    #[default]
    #[serde(alias = "latest")]
    ESNext,
}

impl ScriptTarget {
    /// Whether syntax introduced in `required` is available.
    #[must_use]
    pub fn supports(self, required: ScriptTarget) -> bool {
        self >= required
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ScriptTarget::ES5 => "ES5",
            ScriptTarget::ES2015 => "ES2015",
            ScriptTarget::ES2016 => "ES2016",
            ScriptTarget::ES2017 => "ES2017",
            ScriptTarget::ES2018 => "ES2018",
            ScriptTarget::ES2019 => "ES2019",
            ScriptTarget::ES2020 => "ES2020",
            ScriptTarget::ES2021 => "ES2021",
            ScriptTarget::ES2022 => "ES2022",
            ScriptTarget::ESNext => "ESNext",
        }
    }
}

impl fmt::Display for ScriptTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Goal symbol of a parse: classic script or ES module.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Script,
    Module,
}

impl SourceType {
    /// Modules are always strict mode code.
    #[must_use]
    pub const fn is_module(self) -> bool {
        matches!(self, SourceType::Module)
    }
}
