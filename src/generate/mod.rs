//! Ruby skeletons for missing methods.

use crate::core::{MissingMethods, QualifiedName};
use crate::naming::NameConverter;
use std::collections::BTreeSet;

const INDENT: &str = "  ";
const TEST_CASE_BASE: &str = "Test::Unit::TestCase";

pub struct StubGenerator<'a> {
    converter: &'a NameConverter,
}

impl<'a> StubGenerator<'a> {
    pub fn new(converter: &'a NameConverter) -> Self {
        Self { converter }
    }

    /// Renders every class with at least one missing method, in name order,
    /// followed by the error count line.
    ///
    /// Output depends only on `missing`; the same input always produces the
    /// same bytes.
    pub fn generate(&self, missing: &MissingMethods) -> String {
        let mut lines: Vec<String> = Vec::new();

        if !missing.is_empty() {
            lines.push(String::new());
            lines.push("require 'test/unit'".to_string());
            lines.push(String::new());
        }

        for (class, methods) in missing.iter().filter(|(_, m)| !m.is_empty()) {
            self.render_class(class, methods, &mut lines);
        }

        lines.push(format!("# Number of errors detected: {}", missing.entry_count()));
        lines.push(String::new());
        lines.join("\n")
    }

    fn render_class(&self, class: &QualifiedName, methods: &BTreeSet<String>, lines: &mut Vec<String>) {
        let modules = class.namespace();
        for (depth, module) in modules.iter().enumerate() {
            lines.push(format!("{}module {}", INDENT.repeat(depth), module));
        }

        let depth = modules.len();
        let parent = if self.converter.is_test_class_name(class.as_str()) {
            format!(" < {TEST_CASE_BASE}")
        } else {
            String::new()
        };
        lines.push(format!("{}class {}{}", INDENT.repeat(depth), class.last_segment(), parent));

        let stubs: Vec<String> = methods.iter().map(|m| stub(m, depth + 1)).collect();
        lines.push(stubs.join("\n\n"));

        for level in (0..=depth).rev() {
            lines.push(format!("{}end", INDENT.repeat(level)));
        }
        lines.push(String::new());
    }
}

fn stub(method: &str, depth: usize) -> String {
    let indent = INDENT.repeat(depth);
    format!(
        "{indent}def {method}\n{indent}{INDENT}raise NotImplementedError, 'Need to write {method}'\n{indent}end"
    )
}
