use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared visibility of a type or member.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessSpecifier {
    Public,
    Protected,
    PackagePrivate,
    Private,
}

impl AccessSpecifier {
    /// Reads the access keyword out of a modifier list.
    ///
    /// With no access keyword present the declaration is package-private.
    pub fn from_modifiers<S: AsRef<str>>(modifiers: &[S]) -> Self {
        for m in modifiers {
            match m.as_ref() {
                "public" => return AccessSpecifier::Public,
                "protected" => return AccessSpecifier::Protected,
                "private" => return AccessSpecifier::Private,
                _ => {}
            }
        }
        AccessSpecifier::PackagePrivate
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessSpecifier::Public => "public",
            AccessSpecifier::Protected => "protected",
            AccessSpecifier::PackagePrivate => "",
            AccessSpecifier::Private => "private",
        }
    }
}

impl fmt::Display for AccessSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
