//! Test -> implementation direction.

use crate::core::{ClassRecord, MissingMethods, QualifiedName};
use crate::naming::{is_test_method, is_utility_method, NameConverter};
use crate::registry::ClassRegistry;

const CONSTRUCTOR: &str = "initialize";

/// Every `test_` method of a test class should name a method the
/// implementation class has.
pub fn find_untargeted_tests(registry: &ClassRegistry, converter: &NameConverter) -> MissingMethods {
    let mut missing = MissingMethods::new();

    for test_class in registry.tests() {
        let class_name = converter.convert_class_name(test_class.name.as_str());

        let Some(class) = registry.implementation(&class_name) else {
            log::debug!("Class {} does not exist", class_name);
            missing.touch(class_name.clone());
            for method in test_class.own_methods.iter().filter(|m| is_test_method(m)) {
                missing.insert(class_name.clone(), converter.test_method_to_method(method));
            }
            continue;
        };

        for test_method in &test_class.own_methods {
            if !is_test_method(test_method) {
                if !is_utility_method(test_method) {
                    log::debug!("Skipping {}#{}", test_class.name, test_method);
                }
                continue;
            }

            let base = converter.test_method_to_method(test_method);
            if !is_targeted(&base, class, registry, &class_name) {
                log::debug!("Method {}#{} does not exist", class_name, base);
                missing.insert(class_name.clone(), base);
            }
        }
    }

    missing
}

fn is_targeted(
    base: &str,
    class: &ClassRecord,
    registry: &ClassRegistry,
    class_name: &QualifiedName,
) -> bool {
    let inherited = registry.inherited_methods(class_name);
    candidate_names(base).any(|candidate| {
        candidate == CONSTRUCTOR
            || class.responds_to(candidate)
            || inherited.is_some_and(|methods| methods.contains(candidate))
    })
}

/// `push_onto_full`, `push_onto`, `push`.
///
/// A trailing segment is only removed when it has at least one character, so
/// `push_` yields nothing shorter.
pub fn candidate_names(base: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(Some(base), |&name| {
        let (head, tail) = name.rsplit_once('_')?;
        (!tail.is_empty()).then_some(head)
    })
    .take_while(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ClassKind;
    use crate::naming::NamingConvention;

    fn record(name: &str, kind: ClassKind, own: &[&str], inherited: &[&str]) -> ClassRecord {
        ClassRecord {
            name: QualifiedName::from(name),
            kind,
            own_methods: own.iter().map(|m| m.to_string()).collect(),
            inherited_methods: inherited.iter().map(|m| m.to_string()).collect(),
            full_mode: false,
        }
    }

    fn registry(records: Vec<ClassRecord>) -> ClassRegistry {
        let mut registry = ClassRegistry::new();
        for r in records {
            registry.insert(r);
        }
        registry
    }

    #[test]
    fn test_candidate_names_strip_trailing_segments() {
        let names: Vec<_> = candidate_names("push_onto_full").collect();
        assert_eq!(names, vec!["push_onto_full", "push_onto", "push"]);
        assert_eq!(candidate_names("push_").collect::<Vec<_>>(), vec!["push_"]);
        assert_eq!(candidate_names("").count(), 0);
        assert_eq!(candidate_names("_private").collect::<Vec<_>>(), vec!["_private"]);
    }

    #[test]
    fn test_suffix_convention_fuzzy_match() {
        let converter = NameConverter::new(NamingConvention::Suffix);
        let registry = registry(vec![
            record("Stack", ClassKind::Implementation, &["push"], &[]),
            record("StackTest", ClassKind::Test, &["test_push_onto_full"], &[]),
        ]);
        assert!(find_untargeted_tests(&registry, &converter).is_empty());
    }

    #[test]
    fn test_unmatched_test_reports_original_name() {
        let registry = registry(vec![
            record("Stack", ClassKind::Implementation, &["push"], &[]),
            record("TestStack", ClassKind::Test, &["test_peek_twice"], &[]),
        ]);
        let missing = find_untargeted_tests(&registry, &NameConverter::default());
        assert!(missing.contains("Stack", "peek_twice"));
        assert_eq!(missing.entry_count(), 1);
    }

    #[test]
    fn test_inherited_and_constructor_count_as_targets() {
        let registry = registry(vec![
            record("Dog", ClassKind::Implementation, &["bark"], &["eat"]),
            record(
                "TestDog",
                ClassKind::Test,
                &["test_eat_bone", "test_initialize_with_name", "test_bark"],
                &[],
            ),
        ]);
        assert!(find_untargeted_tests(&registry, &NameConverter::default()).is_empty());
    }

    #[test]
    fn test_operator_words_map_back() {
        let registry = registry(vec![
            record("Vec2", ClassKind::Implementation, &["+"], &[]),
            record("TestVec2", ClassKind::Test, &["test_plus", "test_times"], &[]),
        ]);
        let missing = find_untargeted_tests(&registry, &NameConverter::default());
        assert!(missing.contains("Vec2", "*"));
        assert_eq!(missing.entry_count(), 1);
    }

    #[test]
    fn test_utility_and_helper_methods_never_reported() {
        let registry = registry(vec![
            record("Stack", ClassKind::Implementation, &[], &[]),
            record("TestStack", ClassKind::Test, &["util_fill", "setup", "helper"], &[]),
        ]);
        assert!(find_untargeted_tests(&registry, &NameConverter::default()).is_empty());

        let orphan = registry_without_impl();
        let missing = find_untargeted_tests(&orphan, &NameConverter::default());
        assert!(missing.contains("Queue", "enqueue"));
        assert!(!missing.contains("Queue", "util_fill"));
        assert_eq!(missing.entry_count(), 1);
    }

    fn registry_without_impl() -> ClassRegistry {
        registry(vec![record(
            "TestQueue",
            ClassKind::Test,
            &["test_enqueue", "util_fill"],
            &[],
        )])
    }
}
