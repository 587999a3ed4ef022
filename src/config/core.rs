use serde::{Deserialize, Serialize};

use crate::naming::{NameConverter, NamingConvention};
use crate::scanner::DEFAULT_MARKER_TAG;

/// Root configuration read from `.testgap.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestgapConfig {
    /// Use `FooTest` instead of `TestFoo` for test class names
    pub reverse: bool,

    /// Keep base-object methods for every class
    pub full: bool,

    /// Comment tag recognized in `# <marker> SKIP` and `# <marker> FULL`
    pub marker: String,

    /// Method names excluded in addition to the built-in base-object list
    pub excluded_methods: Vec<String>,

    /// Glob patterns skipped when walking directories
    pub ignore: Vec<String>,
}

impl Default for TestgapConfig {
    fn default() -> Self {
        Self {
            reverse: false,
            full: false,
            marker: DEFAULT_MARKER_TAG.to_string(),
            excluded_methods: Vec::new(),
            ignore: Vec::new(),
        }
    }
}

impl TestgapConfig {
    pub fn naming_convention(&self) -> NamingConvention {
        NamingConvention::from_reverse_flag(self.reverse)
    }

    pub fn name_converter(&self) -> NameConverter {
        NameConverter::new(self.naming_convention())
    }

    /// Command-line switches can only turn options on.
    pub fn with_overrides(mut self, reverse: bool, full: bool) -> Self {
        self.reverse |= reverse;
        self.full |= full;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TestgapConfig::default();
        assert_eq!(config.marker, "ZenTest");
        assert_eq!(config.naming_convention(), NamingConvention::Prefix);
        assert!(!config.full);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: TestgapConfig = toml::from_str("reverse = true\n").unwrap();
        assert!(config.reverse);
        assert_eq!(config.marker, "ZenTest");
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn test_overrides_only_enable() {
        let config = TestgapConfig {
            full: true,
            ..Default::default()
        }
        .with_overrides(true, false);
        assert!(config.reverse);
        assert!(config.full);
    }
}
