// Export modules for library usage
pub mod analysis;
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod coverage;
pub mod generate;
pub mod io;
pub mod naming;
pub mod registry;
pub mod scanner;

// Re-export commonly used types
pub use crate::core::{
    ClassKind, ClassRecord, Error, MethodName, MissingMethods, QualifiedName, Result,
};

pub use crate::analysis::GapAnalyzer;
pub use crate::analyzers::{ClassInfo, RubyIntrospector, SourceIntrospector, StaticIntrospector};
pub use crate::commands::fix::{analyze_sources, fix, FixReport};
pub use crate::config::TestgapConfig;
pub use crate::coverage::{CoverageReporter, CoverageRow};
pub use crate::generate::StubGenerator;
pub use crate::io::{load_sources, SourceFile};
pub use crate::naming::{NameConverter, NamingConvention};
pub use crate::registry::{ClassRegistry, RegistryBuilder};
