//! Methods every Ruby object answers to.
//!
//! A class that defines `to_s` or `==` is not expected to have a test for it,
//! so these names are dropped from own and inherited method sets unless the
//! class is analyzed in full mode. The list is `Object#instance_methods`
//! together with `Kernel.methods` (module functions plus `Module` instance
//! methods) of a stock interpreter.

use std::collections::BTreeSet;

pub const BASE_OBJECT_METHODS: &[&str] = &[
    // Object
    "!",
    "!=",
    "!~",
    "<=>",
    "==",
    "===",
    "=~",
    "__id__",
    "__send__",
    "class",
    "clone",
    "define_singleton_method",
    "display",
    "dup",
    "enum_for",
    "eql?",
    "equal?",
    "extend",
    "freeze",
    "frozen?",
    "hash",
    "inspect",
    "instance_eval",
    "instance_exec",
    "instance_of?",
    "instance_variable_defined?",
    "instance_variable_get",
    "instance_variable_set",
    "instance_variables",
    "is_a?",
    "itself",
    "kind_of?",
    "method",
    "methods",
    "nil?",
    "object_id",
    "private_methods",
    "protected_methods",
    "public_method",
    "public_methods",
    "public_send",
    "remove_instance_variable",
    "respond_to?",
    "send",
    "singleton_class",
    "singleton_method",
    "singleton_methods",
    "tap",
    "then",
    "to_enum",
    "to_s",
    "yield_self",
    // Module
    "<",
    "<=",
    ">",
    ">=",
    "alias_method",
    "ancestors",
    "attr",
    "attr_accessor",
    "attr_reader",
    "attr_writer",
    "autoload",
    "autoload?",
    "class_eval",
    "class_exec",
    "class_variable_defined?",
    "class_variable_get",
    "class_variable_set",
    "class_variables",
    "const_defined?",
    "const_get",
    "const_missing",
    "const_set",
    "const_source_location",
    "constants",
    "define_method",
    "include",
    "include?",
    "included_modules",
    "instance_method",
    "instance_methods",
    "method_defined?",
    "module_eval",
    "module_exec",
    "name",
    "prepend",
    "private_class_method",
    "private_constant",
    "private_instance_methods",
    "private_method_defined?",
    "protected_instance_methods",
    "protected_method_defined?",
    "public_class_method",
    "public_instance_method",
    "public_instance_methods",
    "public_method_defined?",
    "remove_class_variable",
    "remove_method",
    "undef_method",
    // Kernel module functions
    "Array",
    "Complex",
    "Float",
    "Hash",
    "Integer",
    "Rational",
    "String",
    "__callee__",
    "__dir__",
    "__method__",
    "abort",
    "at_exit",
    "binding",
    "block_given?",
    "caller",
    "caller_locations",
    "catch",
    "eval",
    "exec",
    "exit",
    "exit!",
    "fail",
    "fork",
    "format",
    "gets",
    "global_variables",
    "iterator?",
    "lambda",
    "load",
    "local_variables",
    "loop",
    "open",
    "p",
    "pp",
    "print",
    "printf",
    "proc",
    "putc",
    "puts",
    "raise",
    "rand",
    "readline",
    "readlines",
    "require",
    "require_relative",
    "select",
    "sleep",
    "spawn",
    "sprintf",
    "srand",
    "syscall",
    "system",
    "test",
    "throw",
    "trap",
    "warn",
];

/// The base list plus any configured extras.
pub fn excluded_method_set(extra: &[String]) -> BTreeSet<String> {
    BASE_OBJECT_METHODS
        .iter()
        .map(|name| name.to_string())
        .chain(extra.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_object_methods_are_excluded() {
        let set = excluded_method_set(&[]);
        for name in ["to_s", "inspect", "==", "hash", "name"] {
            assert!(set.contains(name), "{name} should be excluded");
        }
    }

    #[test]
    fn test_domain_methods_are_not_excluded() {
        let set = excluded_method_set(&[]);
        for name in ["push", "pop", "render", "frobnicate"] {
            assert!(!set.contains(name), "{name} should be kept");
        }
    }

    #[test]
    fn test_extra_names_are_added() {
        let set = excluded_method_set(&["to_json".to_string()]);
        assert!(set.contains("to_json"));
    }
}
