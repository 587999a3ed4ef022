//! Implementation -> test direction.

use crate::core::MissingMethods;
use crate::naming::NameConverter;
use crate::registry::ClassRegistry;

/// Every public method of an implementation class needs a test method in
/// the matching test class.
pub fn find_untested_methods(registry: &ClassRegistry, converter: &NameConverter) -> MissingMethods {
    let mut missing = MissingMethods::new();

    for class in registry.implementations() {
        let test_name = converter.convert_class_name(class.name.as_str());

        let Some(test_class) = registry.test(&test_name) else {
            log::debug!("Test class {} does not exist", test_name);
            missing.touch(test_name.clone());
            for method in &class.own_methods {
                missing.insert(test_name.clone(), converter.method_to_test_method(method));
            }
            continue;
        };

        for method in &class.own_methods {
            let expected = converter.method_to_test_method(method);
            let covered = test_class
                .own_methods
                .iter()
                .any(|candidate| covers(candidate, &expected));
            if !covered {
                log::debug!("Method {}#{} does not exist", test_name, expected);
                missing.insert(test_name.clone(), expected);
            }
        }
    }

    missing
}

/// `test_foo` is covered by `test_foo` itself or by `test_foo_with_nil`
/// style variants.
pub fn covers(test_method: &str, expected: &str) -> bool {
    match test_method.strip_prefix(expected) {
        Some("") => true,
        Some(rest) => {
            rest.len() >= 2
                && rest.starts_with('_')
                && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}
