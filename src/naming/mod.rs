//! Naming convention between implementation classes and their tests.
//!
//! Classes map to test classes by adding a `Test` marker to every segment of
//! the qualified name (`Foo::Bar` -> `TestFoo::TestBar` in prefix mode,
//! `FooTest::BarTest` in suffix mode). Methods map to test methods by a
//! `test_` prefix, with operator methods spelled out as words.

pub mod operators;

use crate::core::{ClassKind, QualifiedName, NAMESPACE_SEPARATOR};
use serde::{Deserialize, Serialize};

pub const TEST_MARKER: &str = "Test";
pub const TEST_METHOD_PREFIX: &str = "test_";
pub const UTILITY_METHOD_PREFIX: &str = "util_";

/// Where the `Test` marker goes on a class name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingConvention {
    /// `TestFoo`
    #[default]
    Prefix,
    /// `FooTest`
    Suffix,
}

impl NamingConvention {
    pub fn from_reverse_flag(reverse: bool) -> Self {
        if reverse {
            Self::Suffix
        } else {
            Self::Prefix
        }
    }

    fn marks(self, segment: &str) -> bool {
        match self {
            Self::Prefix => segment.starts_with(TEST_MARKER),
            Self::Suffix => segment.ends_with(TEST_MARKER),
        }
    }

    fn add_marker(self, segment: &str) -> String {
        match self {
            Self::Prefix => format!("{TEST_MARKER}{segment}"),
            Self::Suffix => format!("{segment}{TEST_MARKER}"),
        }
    }

    fn strip_marker(self, segment: &str) -> &str {
        match self {
            Self::Prefix => segment.strip_prefix(TEST_MARKER),
            Self::Suffix => segment.strip_suffix(TEST_MARKER),
        }
        .unwrap_or(segment)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NameConverter {
    convention: NamingConvention,
}

impl NameConverter {
    pub fn new(convention: NamingConvention) -> Self {
        Self { convention }
    }

    pub fn convention(&self) -> NamingConvention {
        self.convention
    }

    /// True iff every segment of `name` carries the test marker.
    ///
    /// The empty name has no segment to carry it and is never a test class.
    pub fn is_test_class_name(&self, name: &str) -> bool {
        !name.is_empty()
            && name
                .split(NAMESPACE_SEPARATOR)
                .all(|segment| self.convention.marks(segment))
    }

    pub fn classify(&self, name: &str) -> ClassKind {
        if self.is_test_class_name(name) {
            ClassKind::Test
        } else {
            ClassKind::Implementation
        }
    }

    /// Maps a test class name to its implementation name and anything else
    /// to its test class name.
    ///
    /// The rewrite is segment by segment and purely textual, so names with
    /// markers in unexpected places (`TestTestFoo`) do not round-trip.
    pub fn convert_class_name(&self, name: &str) -> QualifiedName {
        let is_test = self.is_test_class_name(name);
        let segments = name.split(NAMESPACE_SEPARATOR).map(|segment| {
            if is_test {
                self.convention.strip_marker(segment).to_string()
            } else {
                self.convention.add_marker(segment)
            }
        });
        QualifiedName::from_segments(segments)
    }

    pub fn method_to_test_method(&self, name: &str) -> String {
        format!("{TEST_METHOD_PREFIX}{}", operators::translate(name))
    }

    pub fn test_method_to_method(&self, name: &str) -> String {
        let stripped = name.strip_prefix(TEST_METHOD_PREFIX).unwrap_or(name);
        operators::translate(stripped).to_string()
    }
}

pub fn is_test_method(name: &str) -> bool {
    name.starts_with(TEST_METHOD_PREFIX)
}

pub fn is_utility_method(name: &str) -> bool {
    name.starts_with(UTILITY_METHOD_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn prefix() -> NameConverter {
        NameConverter::new(NamingConvention::Prefix)
    }

    fn suffix() -> NameConverter {
        NameConverter::new(NamingConvention::Suffix)
    }

    #[test]
    fn test_prefix_classification() {
        assert!(prefix().is_test_class_name("TestFoo"));
        assert!(prefix().is_test_class_name("TestFoo::TestBar"));
        assert!(!prefix().is_test_class_name("TestFoo::Bar"));
        assert!(!prefix().is_test_class_name("FooTest"));
        assert!(!prefix().is_test_class_name(""));
    }

    #[test]
    fn test_suffix_classification() {
        assert!(suffix().is_test_class_name("FooTest"));
        assert!(suffix().is_test_class_name("FooTest::BarTest"));
        assert!(!suffix().is_test_class_name("TestFoo"));
        assert_eq!(suffix().classify("Stack"), ClassKind::Implementation);
    }

    #[test]
    fn test_convert_class_name_prefix() {
        assert_eq!(prefix().convert_class_name("Foo::Blah").as_str(), "TestFoo::TestBlah");
        assert_eq!(prefix().convert_class_name("TestFoo::TestBlah").as_str(), "Foo::Blah");
    }

    #[test]
    fn test_convert_class_name_suffix() {
        assert_eq!(suffix().convert_class_name("Foo::Blah").as_str(), "FooTest::BlahTest");
        assert_eq!(suffix().convert_class_name("FooTest::BlahTest").as_str(), "Foo::Blah");
    }

    #[test]
    fn test_partially_marked_name_gets_marked_again() {
        // Only one segment carries the marker, so this is an implementation name.
        assert_eq!(
            prefix().convert_class_name("TestFoo::Bar").as_str(),
            "TestTestFoo::TestBar"
        );
    }

    #[test]
    fn test_double_marker_strips_once() {
        assert_eq!(prefix().convert_class_name("TestTestFoo").as_str(), "TestFoo");
    }

    #[test]
    fn test_method_to_test_method() {
        let conv = prefix();
        assert_eq!(conv.method_to_test_method("push"), "test_push");
        assert_eq!(conv.method_to_test_method("[]"), "test_index");
        assert_eq!(conv.method_to_test_method("<<"), "test_append");
    }

    #[test]
    fn test_test_method_to_method() {
        let conv = prefix();
        assert_eq!(conv.test_method_to_method("test_push"), "push");
        assert_eq!(conv.test_method_to_method("test_index_equals"), "[]=");
        assert_eq!(conv.test_method_to_method("setup"), "setup");
    }

    #[test]
    fn test_method_prefix_predicates() {
        assert!(is_test_method("test_x"));
        assert!(!is_test_method("testx"));
        assert!(is_utility_method("util_build"));
    }

    proptest! {
        #[test]
        fn classification_is_deterministic(name in "[A-Za-z]{0,8}(::[A-Za-z]{1,8}){0,3}", reverse in any::<bool>()) {
            let conv = NameConverter::new(NamingConvention::from_reverse_flag(reverse));
            prop_assert_eq!(conv.is_test_class_name(&name), conv.is_test_class_name(&name));
        }

        #[test]
        fn classification_depends_only_on_segments(segments in proptest::collection::vec("[A-Z][a-z]{0,6}", 1..4)) {
            let conv = prefix();
            let name = segments.join("::");
            let expected = segments.iter().all(|s| s.starts_with("Test"));
            prop_assert_eq!(conv.is_test_class_name(&name), expected);
        }

        #[test]
        fn unmarked_names_round_trip(segments in proptest::collection::vec("[A-SU-Z][a-z]{1,6}", 1..4), reverse in any::<bool>()) {
            // Segments never start with `T` or end with `Test`, so the marker
            // position is unambiguous.
            let conv = NameConverter::new(NamingConvention::from_reverse_flag(reverse));
            let name = segments.join("::");
            let test_name = conv.convert_class_name(&name);
            prop_assert!(conv.is_test_class_name(test_name.as_str()));
            let back = conv.convert_class_name(test_name.as_str());
            prop_assert_eq!(back.as_str(), name.as_str());
        }
    }
}
