//! Static introspection of Ruby classes.
//!
//! Sources are parsed with tree-sitter; every `class`/`module` body becomes a
//! [`ClassDefinition`]. Bodies reopening the same qualified name are merged,
//! mirroring how Ruby itself treats a reopened class. Method sets are then
//! answered from the merged definitions without loading any code.

pub mod base_methods;
pub mod extract;

use super::{ClassInfo, SourceIntrospector};
use crate::core::{Error, QualifiedName, Result, NAMESPACE_SEPARATOR};
use crate::io::SourceFile;
use extract::{ClassDefinition, DefinitionKind, Visibility};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap, HashSet};

pub use extract::extract_definitions;

#[derive(Debug, Default)]
pub struct RubyIntrospector {
    /// Merged definitions in order of first appearance.
    definitions: Vec<ClassDefinition>,
    index: HashMap<QualifiedName, usize>,
    excluded: BTreeSet<String>,
}

impl RubyIntrospector {
    /// Extends the base-object exclusion list with `extra` names.
    pub fn with_excluded_methods(extra: &[String]) -> Self {
        Self {
            definitions: Vec::new(),
            index: HashMap::new(),
            excluded: base_methods::excluded_method_set(extra),
        }
    }

    /// Parses every source in parallel and merges the results in input order.
    ///
    /// A source that cannot be parsed is logged and skipped.
    pub fn from_sources(sources: &[SourceFile], extra_excluded: &[String]) -> Self {
        let parsed: Vec<Result<Vec<ClassDefinition>>> = sources
            .par_iter()
            .map(|source| extract_definitions(&source.origin, &source.text))
            .collect();

        let mut introspector = Self::with_excluded_methods(extra_excluded);
        for (source, result) in sources.iter().zip(parsed) {
            match result {
                Ok(definitions) => introspector.add_definitions(definitions),
                Err(e) => log::warn!("Skipping {}: {}", source.origin.display(), e),
            }
        }
        introspector
    }

    pub fn add_definitions(&mut self, definitions: Vec<ClassDefinition>) {
        for definition in definitions {
            match self.index.get(&definition.name) {
                Some(&i) => merge_reopened(&mut self.definitions[i], definition),
                None => {
                    self.index
                        .insert(definition.name.clone(), self.definitions.len());
                    self.definitions.push(definition);
                }
            }
        }
    }

    fn lookup(&self, name: &QualifiedName) -> Option<&ClassDefinition> {
        self.index.get(name).map(|&i| &self.definitions[i])
    }

    /// Exact qualified match first, then the first definition whose name ends
    /// in `::name`.
    pub fn resolve(&self, name: &str) -> Option<&ClassDefinition> {
        let name = name.trim_start_matches(NAMESPACE_SEPARATOR);
        self.lookup(&QualifiedName::from(name)).or_else(|| {
            self.definitions
                .iter()
                .find(|d| d.name.ends_with_path(name))
        })
    }

    /// Resolves a constant written inside `scope`, innermost namespace first.
    fn resolve_relative(&self, written: &str, scope: &[String]) -> Option<&ClassDefinition> {
        if let Some(absolute) = written.strip_prefix(NAMESPACE_SEPARATOR) {
            return self.lookup(&QualifiedName::from(absolute));
        }
        (0..=scope.len())
            .rev()
            .find_map(|depth| {
                let candidate = QualifiedName::from_segments(
                    scope[..depth].iter().map(String::as_str).chain([written]),
                );
                self.lookup(&candidate)
            })
            .or_else(|| self.resolve(written))
    }

    fn filter(&self, methods: impl Iterator<Item = String>, full: bool) -> BTreeSet<String> {
        methods
            .filter(|m| full || !self.excluded.contains(m))
            .collect()
    }

    fn own_methods(&self, definition: &ClassDefinition, full: bool) -> BTreeSet<String> {
        let public = definition
            .methods
            .iter()
            .filter(|(_, v)| **v == Visibility::Public)
            .map(|(name, _)| name.clone());
        self.filter(public, full)
    }

    /// Callable (public or protected) methods of every ancestor reached through
    /// the superclass chain, including modules those ancestors mix in.
    fn inherited_methods(&self, definition: &ClassDefinition, full: bool) -> BTreeSet<String> {
        if definition.kind == DefinitionKind::Module {
            return BTreeSet::new();
        }

        let mut seen = HashSet::new();
        seen.insert(definition.name.clone());
        let mut methods = Vec::new();
        let mut current = self.superclass_of(definition);
        while let Some(ancestor) = current {
            if !seen.insert(ancestor.name.clone()) {
                log::debug!("Inheritance cycle through {}", ancestor.name);
                break;
            }
            self.collect_callable(ancestor, &mut seen, &mut methods);
            current = self.superclass_of(ancestor);
        }
        self.filter(methods.into_iter(), full)
    }

    fn superclass_of(&self, definition: &ClassDefinition) -> Option<&ClassDefinition> {
        let written = definition.superclass.as_deref()?;
        let found = self.resolve_relative(written, &definition.scope);
        if found.is_none() {
            log::trace!("Superclass {} of {} is external", written, definition.name);
        }
        found.filter(|d| d.kind == DefinitionKind::Class)
    }

    fn collect_callable(
        &self,
        definition: &ClassDefinition,
        seen: &mut HashSet<QualifiedName>,
        out: &mut Vec<String>,
    ) {
        out.extend(
            definition
                .methods
                .iter()
                .filter(|(_, v)| **v != Visibility::Private)
                .map(|(name, _)| name.clone()),
        );
        let own_scope: Vec<String> = definition.name.segments().map(str::to_string).collect();
        for written in &definition.includes {
            if let Some(module) = self.resolve_relative(written, &own_scope) {
                if module.kind == DefinitionKind::Module && seen.insert(module.name.clone()) {
                    self.collect_callable(module, seen, out);
                }
            }
        }
    }
}

impl SourceIntrospector for RubyIntrospector {
    fn introspect(&self, name: &str, full: bool) -> Result<ClassInfo> {
        let definition = self.resolve(name).ok_or_else(|| Error::unresolved(name))?;
        Ok(ClassInfo {
            name: definition.name.clone(),
            own_methods: self.own_methods(definition, full),
            inherited_methods: self.inherited_methods(definition, full),
        })
    }
}

fn merge_reopened(existing: &mut ClassDefinition, reopened: ClassDefinition) {
    if existing.superclass.is_none() {
        existing.superclass = reopened.superclass;
    }
    for include in reopened.includes {
        if !existing.includes.contains(&include) {
            existing.includes.push(include);
        }
    }
    existing.methods.extend(reopened.methods);
}
