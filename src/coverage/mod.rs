//! Assertions-per-method ratio table.

use crate::naming::NameConverter;
use crate::registry::ClassRegistry;
use std::fmt::Write;

#[derive(Clone, Debug, PartialEq)]
pub struct CoverageRow {
    pub class_name: String,
    pub assertions: usize,
    pub methods: usize,
    pub ratio: f64,
}

pub struct CoverageReporter<'a> {
    converter: &'a NameConverter,
}

impl<'a> CoverageReporter<'a> {
    pub fn new(converter: &'a NameConverter) -> Self {
        Self { converter }
    }

    /// One row per implementation class that had at least one `def` line,
    /// best covered first.
    pub fn rows(&self, registry: &ClassRegistry) -> Vec<CoverageRow> {
        let mut rows: Vec<CoverageRow> = registry
            .definition_counts()
            .iter()
            .filter(|(name, _)| !self.converter.is_test_class_name(name))
            .map(|(name, &methods)| {
                let test_name = self.converter.convert_class_name(name);
                let assertions = registry.assertion_count(test_name.as_str());
                CoverageRow {
                    class_name: name.clone(),
                    assertions,
                    methods,
                    ratio: ratio(assertions, methods),
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            b.ratio
                .total_cmp(&a.ratio)
                .then_with(|| a.class_name.cmp(&b.class_name))
        });
        rows
    }

    pub fn render(&self, registry: &ClassRegistry) -> String {
        render_rows(&self.rows(registry))
    }
}

fn ratio(assertions: usize, methods: usize) -> f64 {
    if methods == 0 {
        0.0
    } else {
        assertions as f64 / methods as f64 * 100.0
    }
}

pub fn render_rows(rows: &[CoverageRow]) -> String {
    let mut out = format!(
        "# {:>25}: {:>4} / {:>4} = {:>6}%\n",
        "classname", "asrt", "meth", "ratio"
    );
    for row in rows {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "# {:>25}: {:>4} / {:>4} = {:>6.2}%",
            row.class_name, row.assertions, row.methods, row.ratio
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::StaticIntrospector;
    use crate::registry::RegistryBuilder;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn registry(text: &str) -> ClassRegistry {
        let intro = StaticIntrospector::new();
        let mut builder = RegistryBuilder::new(&intro, NameConverter::default());
        builder.scan_text(text);
        builder.build()
    }

    #[test]
    fn test_ratio_table() {
        let registry = registry(indoc! {"
            class Stack
              def push; end
              def pop; end
            end
            class Queue
              def enqueue; end
            end
            class TestStack
              def test_push
                assert true
                assert true
                assert true
              end
            end
        "});
        let converter = NameConverter::default();
        let out = CoverageReporter::new(&converter).render(&registry);
        assert_eq!(
            out,
            [
                "#                 classname: asrt / meth =  ratio%",
                "#                     Stack:    3 /    2 = 150.00%",
                "#                     Queue:    0 /    1 =   0.00%",
                "",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_ties_sorted_by_name() {
        let registry = registry("class Beta\n  def b; end\nclass Alpha\n  def a; end\n");
        let converter = NameConverter::default();
        let names: Vec<_> = CoverageReporter::new(&converter)
            .rows(&registry)
            .into_iter()
            .map(|r| r.class_name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_zero_methods_guarded() {
        assert_eq!(ratio(5, 0), 0.0);
    }
}
