use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// An elemental type label such as `火` or `水`.
///
/// Type names are data, not an enum: the set of valid names is whatever the
/// loaded type chart defines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        TypeName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        TypeName(name.to_string())
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        TypeName(name)
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// How a defending type reacts to attacking types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRelation {
    /// Attacking types this type resists.
    #[serde(default)]
    pub resist: Vec<TypeName>,
    /// Attacking types this type is weak to.
    #[serde(default)]
    pub weak: Vec<TypeName>,
    /// Attacking types this type is immune to.
    #[serde(default)]
    pub immune: Vec<TypeName>,
}

impl TypeRelation {
    pub fn resists(&self, attacking: &str) -> bool {
        self.resist.iter().any(|t| t.as_str() == attacking)
    }

    pub fn is_weak_to(&self, attacking: &str) -> bool {
        self.weak.iter().any(|t| t.as_str() == attacking)
    }

    pub fn is_immune_to(&self, attacking: &str) -> bool {
        self.immune.iter().any(|t| t.as_str() == attacking)
    }
}

/// One row of a type chart file: a defending type and its relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeChartEntry {
    pub name: TypeName,
    #[serde(default)]
    pub resist: Vec<TypeName>,
    #[serde(default)]
    pub weak: Vec<TypeName>,
    #[serde(default)]
    pub immune: Vec<TypeName>,
}

impl TypeChartEntry {
    pub fn into_parts(self) -> (TypeName, TypeRelation) {
        (
            self.name,
            TypeRelation {
                resist: self.resist,
                weak: self.weak,
                immune: self.immune,
            },
        )
    }
}
