//! Class records collected from a line scan of the inputs.

use crate::analyzers::SourceIntrospector;
use crate::core::{ClassKind, ClassRecord, MethodName, QualifiedName};
use crate::io::SourceFile;
use crate::naming::NameConverter;
use crate::scanner::{Declaration, LineScanner, Marker, ScanEvent, DEFAULT_MARKER_TAG};
use std::collections::{BTreeMap, BTreeSet};

/// Implementation and test records plus the per-class line counts.
///
/// Records are keyed by fully qualified name. Counts are keyed by the name
/// that was current while scanning, which is the raw declared name when it
/// could not be resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassRegistry {
    implementations: BTreeMap<QualifiedName, ClassRecord>,
    tests: BTreeMap<QualifiedName, ClassRecord>,
    inherited: BTreeMap<QualifiedName, BTreeSet<MethodName>>,
    definition_counts: BTreeMap<String, usize>,
    assertion_counts: BTreeMap<String, usize>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record`, replacing any earlier record of the same name.
    pub fn insert(&mut self, record: ClassRecord) {
        self.inherited
            .insert(record.name.clone(), record.inherited_methods.clone());
        let target = match record.kind {
            ClassKind::Implementation => &mut self.implementations,
            ClassKind::Test => &mut self.tests,
        };
        if let Some(previous) = target.insert(record.name.clone(), record) {
            log::trace!("Replacing earlier record for {}", previous.name);
        }
    }

    pub fn implementations(&self) -> impl Iterator<Item = &ClassRecord> {
        self.implementations.values()
    }

    pub fn tests(&self) -> impl Iterator<Item = &ClassRecord> {
        self.tests.values()
    }

    pub fn implementation(&self, name: &QualifiedName) -> Option<&ClassRecord> {
        self.implementations.get(name)
    }

    pub fn test(&self, name: &QualifiedName) -> Option<&ClassRecord> {
        self.tests.get(name)
    }

    pub fn inherited_methods(&self, name: &QualifiedName) -> Option<&BTreeSet<MethodName>> {
        self.inherited.get(name)
    }

    pub fn definition_counts(&self) -> &BTreeMap<String, usize> {
        &self.definition_counts
    }

    pub fn definition_count(&self, name: &str) -> usize {
        self.definition_counts.get(name).copied().unwrap_or(0)
    }

    pub fn assertion_count(&self, name: &str) -> usize {
        self.assertion_counts.get(name).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.implementations.is_empty() && self.tests.is_empty()
    }
}

/// Drives the line scan over every source and fills a [`ClassRegistry`].
///
/// The current class carries over from one source to the next, so counts
/// after the last declaration of a file still land on that class.
pub struct RegistryBuilder<'a> {
    introspector: &'a dyn SourceIntrospector,
    converter: NameConverter,
    scanner: LineScanner,
    full_by_default: bool,
    context: Option<String>,
    registry: ClassRegistry,
}

impl<'a> RegistryBuilder<'a> {
    pub fn new(introspector: &'a dyn SourceIntrospector, converter: NameConverter) -> Self {
        Self {
            introspector,
            converter,
            scanner: LineScanner::new(DEFAULT_MARKER_TAG),
            full_by_default: false,
            context: None,
            registry: ClassRegistry::new(),
        }
    }

    pub fn with_marker_tag(mut self, tag: &str) -> Self {
        self.scanner = LineScanner::new(tag);
        self
    }

    pub fn with_full_mode(mut self, full: bool) -> Self {
        self.full_by_default = full;
        self
    }

    pub fn scan_sources(mut self, sources: &[SourceFile]) -> Self {
        for source in sources {
            log::debug!("scanning {}", source.origin.display());
            self.scan_text(&source.text);
        }
        self
    }

    pub fn scan_text(&mut self, text: &str) {
        for event in self.scanner.scan(text) {
            self.apply(event);
        }
    }

    pub fn build(self) -> ClassRegistry {
        self.registry
    }

    fn apply(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::Definition => {
                if let Some(name) = &self.context {
                    *self.registry.definition_counts.entry(name.clone()).or_insert(0) += 1;
                }
            }
            ScanEvent::Assertion => {
                if let Some(name) = &self.context {
                    *self.registry.assertion_counts.entry(name.clone()).or_insert(0) += 1;
                }
            }
            ScanEvent::Declaration(declaration) => self.declare(declaration),
        }
    }

    fn declare(&mut self, declaration: Declaration) {
        if declaration.marker == Some(Marker::Skip) {
            log::debug!("Skipping {} (line {})", declaration.name, declaration.line);
            self.context = None;
            return;
        }

        let full = self.full_by_default || declaration.marker == Some(Marker::Full);
        let info = match self.introspector.introspect(&declaration.name, full) {
            Ok(info) => info,
            Err(e) if e.is_recoverable() => {
                log::debug!("{} (line {})", e, declaration.line);
                self.context = Some(declaration.name);
                return;
            }
            Err(e) => {
                log::warn!("{}", e);
                self.context = Some(declaration.name);
                return;
            }
        };

        self.context = Some(info.name.to_string());
        self.registry.insert(ClassRecord {
            kind: self.converter.classify(info.name.as_str()),
            name: info.name,
            own_methods: info.own_methods,
            inherited_methods: info.inherited_methods,
            full_mode: full,
        });
    }
}
