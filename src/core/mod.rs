pub mod errors;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub use errors::{Error, Result};

/// Separator between the segments of a qualified class name.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// A method identifier; may be an operator such as `[]` or `<<`.
pub type MethodName = String;

/// A `::`-delimited path naming a class or module, e.g. `Mod::Sub::Klass`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedName(String);

impl QualifiedName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = segments
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(NAMESPACE_SEPARATOR);
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(NAMESPACE_SEPARATOR)
    }

    /// Final segment, the class itself.
    pub fn last_segment(&self) -> &str {
        self.segments().last().unwrap_or("")
    }

    /// Enclosing namespace segments, outermost first.
    pub fn namespace(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.segments().collect();
        segments.pop();
        segments
    }

    /// True when this name is `other` or ends with `::other`.
    pub fn ends_with_path(&self, other: &str) -> bool {
        self.0 == other
            || self
                .0
                .strip_suffix(other)
                .is_some_and(|head| head.ends_with(NAMESPACE_SEPARATOR))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for QualifiedName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Implementation,
    Test,
}

/// Everything the analyzer knows about one class after the scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassRecord {
    pub name: QualifiedName,
    pub kind: ClassKind,
    pub own_methods: BTreeSet<MethodName>,
    pub inherited_methods: BTreeSet<MethodName>,
    pub full_mode: bool,
}

impl ClassRecord {
    pub fn responds_to(&self, method: &str) -> bool {
        self.own_methods.contains(method) || self.inherited_methods.contains(method)
    }
}

/// Missing methods grouped by the class that should declare them.
///
/// Both levels are ordered, so iteration is always lexicographic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MissingMethods {
    entries: BTreeMap<QualifiedName, BTreeSet<MethodName>>,
}

impl MissingMethods {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class: QualifiedName, method: impl Into<MethodName>) -> bool {
        self.entries.entry(class).or_default().insert(method.into())
    }

    /// Registers a class with no methods yet; it renders nothing on its own.
    pub fn touch(&mut self, class: QualifiedName) {
        self.entries.entry(class).or_default();
    }

    pub fn merge(&mut self, other: MissingMethods) {
        for (class, methods) in other.entries {
            self.entries.entry(class).or_default().extend(methods);
        }
    }

    pub fn methods_for(&self, class: &QualifiedName) -> Option<&BTreeSet<MethodName>> {
        self.entries.get(class)
    }

    pub fn contains(&self, class: &str, method: &str) -> bool {
        self.entries
            .get(&QualifiedName::from(class))
            .is_some_and(|methods| methods.contains(method))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QualifiedName, &BTreeSet<MethodName>)> {
        self.entries.iter()
    }

    /// Total number of (class, method) pairs.
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    /// True when no class has any missing method.
    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}
