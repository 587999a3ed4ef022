//! Tree-sitter extraction of class and module bodies from Ruby source.

use crate::core::{Error, QualifiedName, Result, NAMESPACE_SEPARATOR};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use tree_sitter::{Node, Parser};

thread_local! {
    static RUBY_PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

/// Methods Ruby makes private no matter where they are defined.
const IMPLICITLY_PRIVATE: &[&str] = &["initialize", "initialize_copy", "respond_to_missing?"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefinitionKind {
    Class,
    Module,
}

/// One `class` or `module` body as written in a source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDefinition {
    pub name: QualifiedName,
    pub kind: DefinitionKind,
    /// Superclass expression as written, e.g. `Base` or `Mod::Base`.
    pub superclass: Option<String>,
    /// Modules mixed in with `include`, as written.
    pub includes: Vec<String>,
    pub methods: BTreeMap<String, Visibility>,
    /// Lexical namespace the definition appears in, outermost first.
    pub scope: Vec<String>,
}

/// Parses `source` and returns every class and module body in document order.
///
/// Trees containing syntax errors are still walked; whatever the parser
/// recovered is returned.
pub fn extract_definitions(path: &Path, source: &str) -> Result<Vec<ClassDefinition>> {
    let tree = RUBY_PARSER.with(|cell| -> Result<_> {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            let mut parser = Parser::new();
            parser
                .set_language(&tree_sitter_ruby::LANGUAGE.into())
                .map_err(|e| Error::parse(path, format!("Failed to set Ruby language: {e}")))?;
            *slot = Some(parser);
        }
        let parser = slot
            .as_mut()
            .ok_or_else(|| Error::parse(path, "Ruby parser unavailable"))?;
        parser
            .parse(source, None)
            .ok_or_else(|| Error::parse(path, "Failed to parse Ruby source"))
    })?;

    let root = tree.root_node();
    if root.has_error() {
        log::debug!("{} contains syntax errors; using recovered tree", path.display());
    }

    let mut definitions = Vec::new();
    collect_definitions(root, source, &[], &mut definitions);
    Ok(definitions)
}

fn collect_definitions(
    node: Node,
    source: &str,
    scope: &[String],
    out: &mut Vec<ClassDefinition>,
) {
    for child in named_children(node) {
        match child.kind() {
            "class" | "module" => extract_definition(child, source, scope, out),
            // Reopening wrappers and conditionals can still hold definitions.
            "begin" | "body_statement" | "if" | "unless" | "then" | "else" => {
                collect_definitions(child, source, scope, out)
            }
            _ => {}
        }
    }
}

fn extract_definition(
    node: Node,
    source: &str,
    scope: &[String],
    out: &mut Vec<ClassDefinition>,
) {
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    let written = text(name_node, source);
    let segments = qualify(scope, written);
    if segments.is_empty() {
        return;
    }

    let kind = if node.kind() == "class" {
        DefinitionKind::Class
    } else {
        DefinitionKind::Module
    };
    let superclass = node
        .child_by_field_name("superclass")
        .and_then(|s| named_children(s).into_iter().next())
        .map(|expr| text(expr, source).to_string());

    let mut definition = ClassDefinition {
        name: QualifiedName::from_segments(&segments),
        kind,
        superclass,
        includes: Vec::new(),
        methods: BTreeMap::new(),
        scope: scope.to_vec(),
    };

    let body = body_statements(node);
    let mut nested = Vec::new();
    BodyWalker::new(source, &mut definition).walk(&body, &segments, &mut nested);

    out.push(definition);
    out.extend(nested);
}

/// Resolves a written class name against the enclosing scope.
fn qualify(scope: &[String], written: &str) -> Vec<String> {
    let (absolute, path) = match written.strip_prefix(NAMESPACE_SEPARATOR) {
        Some(rest) => (true, rest),
        None => (false, written),
    };
    let base = if absolute { &[][..] } else { scope };
    base.iter()
        .cloned()
        .chain(
            path.split(NAMESPACE_SEPARATOR)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        )
        .collect()
}

/// Statements of a class body, whether or not the grammar wraps them in a
/// `body_statement` node.
fn body_statements(node: Node) -> Vec<Node> {
    let name_id = node.child_by_field_name("name").map(|n| n.id());
    let superclass_id = node.child_by_field_name("superclass").map(|n| n.id());

    let mut statements = Vec::new();
    for child in named_children(node) {
        if Some(child.id()) == name_id || Some(child.id()) == superclass_id {
            continue;
        }
        if child.kind() == "body_statement" {
            statements.extend(named_children(child));
        } else {
            statements.push(child);
        }
    }
    statements
}

struct BodyWalker<'a> {
    source: &'a str,
    definition: &'a mut ClassDefinition,
    default_visibility: Visibility,
}

impl<'a> BodyWalker<'a> {
    fn new(source: &'a str, definition: &'a mut ClassDefinition) -> Self {
        Self {
            source,
            definition,
            default_visibility: Visibility::Public,
        }
    }

    fn walk(&mut self, statements: &[Node], segments: &[String], nested: &mut Vec<ClassDefinition>) {
        for &statement in statements {
            match statement.kind() {
                "method" => {
                    let visibility = self.default_visibility;
                    self.define_method_node(statement, visibility);
                }
                "identifier" => self.switch_visibility(text(statement, self.source)),
                "call" => self.handle_call(statement),
                "alias" => {
                    if let Some(name) = statement.child_by_field_name("name") {
                        let alias = text(name, self.source).to_string();
                        self.define(alias, self.default_visibility);
                    }
                }
                "class" | "module" => extract_definition(statement, self.source, segments, nested),
                // `def self.x` and `class << self` define singleton methods only.
                _ => {}
            }
        }
    }

    fn switch_visibility(&mut self, keyword: &str) {
        if let Some(visibility) = visibility_keyword(keyword) {
            self.default_visibility = visibility;
        }
    }

    fn handle_call(&mut self, call: Node) {
        if call.child_by_field_name("receiver").is_some() {
            return;
        }
        let Some(method) = call.child_by_field_name("method") else {
            return;
        };
        let keyword = text(method, self.source);
        let arguments: Vec<Node> = call
            .child_by_field_name("arguments")
            .map(named_children)
            .unwrap_or_default();

        if let Some(visibility) = visibility_keyword(keyword) {
            if arguments.is_empty() {
                self.default_visibility = visibility;
            }
            for argument in arguments {
                if argument.kind() == "method" {
                    self.define_method_node(argument, visibility);
                } else if let Some(name) = symbol_name(argument, self.source) {
                    if let Some(existing) = self.definition.methods.get_mut(&name) {
                        *existing = visibility;
                    }
                }
            }
            return;
        }

        let names: Vec<String> = arguments
            .iter()
            .filter_map(|&arg| symbol_name(arg, self.source))
            .collect();
        let visibility = self.default_visibility;
        match keyword {
            "attr_reader" => names.into_iter().for_each(|n| self.define(n, visibility)),
            "attr_writer" => names
                .into_iter()
                .for_each(|n| self.define(format!("{n}="), visibility)),
            "attr_accessor" => {
                for name in names {
                    self.define(format!("{name}="), visibility);
                    self.define(name, visibility);
                }
            }
            "alias_method" | "define_method" => {
                if let Some(name) = names.into_iter().next() {
                    self.define(name, visibility);
                }
            }
            "include" => {
                for argument in arguments {
                    if matches!(argument.kind(), "constant" | "scope_resolution") {
                        self.definition
                            .includes
                            .push(text(argument, self.source).to_string());
                    }
                }
            }
            _ => {}
        }
    }

    fn define_method_node(&mut self, method: Node, visibility: Visibility) {
        if let Some(name) = method.child_by_field_name("name") {
            let name = text(name, self.source).to_string();
            self.define(name, visibility);
        }
    }

    fn define(&mut self, name: String, visibility: Visibility) {
        let visibility = if IMPLICITLY_PRIVATE.contains(&name.as_str()) {
            Visibility::Private
        } else {
            visibility
        };
        self.definition.methods.insert(name, visibility);
    }
}

fn visibility_keyword(keyword: &str) -> Option<Visibility> {
    match keyword {
        "public" => Some(Visibility::Public),
        "protected" => Some(Visibility::Protected),
        "private" | "module_function" => Some(Visibility::Private),
        _ => None,
    }
}

/// Method name carried by a `:sym`, `:"sym"` or `"sym"` argument.
fn symbol_name(node: Node, source: &str) -> Option<String> {
    match node.kind() {
        "simple_symbol" | "delimited_symbol" | "string" | "bare_symbol" => {
            let raw = text(node, source)
                .trim_start_matches(':')
                .trim_matches(|c| c == '"' || c == '\'');
            (!raw.is_empty()).then(|| raw.to_string())
        }
        _ => None,
    }
}

fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}
