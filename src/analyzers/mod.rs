use crate::core::{MethodName, QualifiedName, Result};
use std::collections::{BTreeMap, BTreeSet};

pub mod ruby;

pub use ruby::RubyIntrospector;

/// Method sets of one resolved class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassInfo {
    /// Fully qualified name the declaration resolved to.
    pub name: QualifiedName,
    pub own_methods: BTreeSet<MethodName>,
    pub inherited_methods: BTreeSet<MethodName>,
}

/// Answers which methods a named class declares and inherits.
///
/// `full` disables the exclusion of methods every object has. A name that
/// matches no class is reported as [`crate::core::Error::UnresolvedClass`].
pub trait SourceIntrospector: Send + Sync {
    fn introspect(&self, name: &str, full: bool) -> Result<ClassInfo>;
}

/// Fixed method tables, for callers that already know their classes.
#[derive(Clone, Debug, Default)]
pub struct StaticIntrospector {
    classes: BTreeMap<QualifiedName, (BTreeSet<MethodName>, BTreeSet<MethodName>)>,
}

impl StaticIntrospector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class<I, S>(mut self, name: &str, own: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<MethodName>,
    {
        self.classes.insert(
            QualifiedName::from(name),
            (own.into_iter().map(Into::into).collect(), BTreeSet::new()),
        );
        self
    }

    pub fn with_inherited<I, S>(mut self, name: &str, inherited: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<MethodName>,
    {
        self.classes
            .entry(QualifiedName::from(name))
            .or_default()
            .1
            .extend(inherited.into_iter().map(Into::into));
        self
    }
}

impl SourceIntrospector for StaticIntrospector {
    fn introspect(&self, name: &str, _full: bool) -> Result<ClassInfo> {
        let key = QualifiedName::from(name);
        let (own, inherited) = self
            .classes
            .get(&key)
            .ok_or_else(|| crate::core::Error::unresolved(name))?;
        Ok(ClassInfo {
            name: key,
            own_methods: own.clone(),
            inherited_methods: inherited.clone(),
        })
    }
}
