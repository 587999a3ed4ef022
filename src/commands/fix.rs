//! The analysis pipeline behind the default command.

use crate::analysis::GapAnalyzer;
use crate::analyzers::RubyIntrospector;
use crate::config::TestgapConfig;
use crate::core::MissingMethods;
use crate::coverage::CoverageReporter;
use crate::generate::StubGenerator;
use crate::io::SourceFile;
use crate::registry::{ClassRegistry, RegistryBuilder};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything one run produces, before it is printed.
#[derive(Debug)]
pub struct FixReport {
    pub registry: ClassRegistry,
    pub missing: MissingMethods,
    pub stubs: String,
    pub coverage: String,
}

pub fn analyze_sources(sources: &[SourceFile], config: &TestgapConfig) -> FixReport {
    let converter = config.name_converter();
    let introspector = RubyIntrospector::from_sources(sources, &config.excluded_methods);

    let registry = RegistryBuilder::new(&introspector, converter)
        .with_marker_tag(&config.marker)
        .with_full_mode(config.full)
        .scan_sources(sources)
        .build();

    let missing = GapAnalyzer::new(converter).analyze(&registry);
    let stubs = StubGenerator::new(&converter).generate(&missing);
    let coverage = CoverageReporter::new(&converter).render(&registry);

    FixReport {
        registry,
        missing,
        stubs,
        coverage,
    }
}

pub fn header(origins: &[String], debug: bool) -> String {
    let mut out = format!("# Code Generated by testgap v. {VERSION}\n");
    if debug {
        out.push_str(&format!("# run against: {}\n", origins.join(", ")));
    }
    out
}

/// Class lists printed after the table in debug mode.
pub fn found_classes(registry: &ClassRegistry) -> String {
    let join = |names: Vec<String>| names.join(", ");
    format!(
        "# found classes: {}\n# found test classes: {}\n",
        join(registry.implementations().map(|r| r.name.to_string()).collect()),
        join(registry.tests().map(|r| r.name.to_string()).collect()),
    )
}

/// Header, stubs, then the ratio table.
pub fn render(report: &FixReport, origins: &[String], debug: bool) -> String {
    let mut out = header(origins, debug);
    out.push_str(&report.stubs);
    out.push_str(&report.coverage);
    if debug {
        out.push_str(&found_classes(&report.registry));
    }
    out
}

/// Stub code for `sources` under `config`, without header or table.
pub fn fix(sources: &[SourceFile], config: &TestgapConfig) -> String {
    analyze_sources(sources, config).stubs
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn sources(text: &str) -> Vec<SourceFile> {
        vec![SourceFile::new("stack.rb", text.to_string())]
    }

    #[test]
    fn test_header_mentions_inputs_only_in_debug() {
        let origins = vec!["a.rb".to_string(), "b.rb".to_string()];
        assert_eq!(header(&origins, false).lines().count(), 1);
        assert!(header(&origins, true).contains("# run against: a.rb, b.rb"));
    }

    #[test]
    fn test_render_orders_sections() {
        let report = analyze_sources(
            &sources(indoc! {"
                class Stack
                  def push; end
                end
            "}),
            &TestgapConfig::default(),
        );
        let out = render(&report, &["stack.rb".to_string()], false);
        let stub = out.find("class TestStack").unwrap();
        let count = out.find("# Number of errors detected: 1").unwrap();
        let table = out.find("classname").unwrap();
        assert!(out.starts_with("# Code Generated by testgap v. "));
        assert!(stub < count && count < table);
    }

    #[test]
    fn test_configured_marker_is_honored() {
        let config = TestgapConfig {
            marker: "Gap".to_string(),
            ..Default::default()
        };
        let out = fix(&sources("class Stack # Gap SKIP\n  def push; end\nend\n"), &config);
        assert_eq!(out, "# Number of errors detected: 0\n");
    }
}
