//! Gap detection between implementation classes and their tests.

pub mod forward;
pub mod reverse;

use crate::core::MissingMethods;
use crate::naming::NameConverter;
use crate::registry::ClassRegistry;

pub use forward::find_untested_methods;
pub use reverse::find_untargeted_tests;

/// Runs both directions over a built registry.
#[derive(Clone, Copy, Debug, Default)]
pub struct GapAnalyzer {
    converter: NameConverter,
}

impl GapAnalyzer {
    pub fn new(converter: NameConverter) -> Self {
        Self { converter }
    }

    pub fn analyze(&self, registry: &ClassRegistry) -> MissingMethods {
        let mut missing = find_untested_methods(registry, &self.converter);
        missing.merge(find_untargeted_tests(registry, &self.converter));
        log::debug!("{} missing methods", missing.entry_count());
        missing
    }
}
