//! Swift mock-factory emission.
//!
//! For each declaration with fields, emits an extension holding a static
//! factory whose parameters default to synthesized literals:
//!
//! ```swift
//! extension User {
//!     static func mock(
//!         id: UUID = UUID(),
//!         nickname: String? = "nickname"
//!     ) -> User {
//!         User(
//!             id: id,
//!             nickname: nickname
//!         )
//!     }
//! }
//! ```
use std::collections::HashSet;
use std::fmt::Write as _;

use crate::category::Category;
use crate::forest::{Field, Forest, NodeId};
use crate::synth::Synthesizer;

const INDENT: &str = "    ";
const HEADER: &str = "// Generated by decl-mock. Replace every <#default value#> before building.\n";

pub struct MockGen {
    synth: Synthesizer,
    function: String,
    out: String,
    unresolved: usize,
}

impl MockGen {
    pub fn new(synth: Synthesizer) -> Self {
        Self {
            synth,
            function: "mock".to_string(),
            out: String::from(HEADER),
            unresolved: 0,
        }
    }

    pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
        self.function = name.into();
        self
    }

    /// Emit factories for every declaration, parents before children.
    pub fn emit(&mut self, forest: &Forest) {
        for id in forest.walk() {
            self.emit_node(forest, id);
        }
    }

    /// Number of parameters left with the unfilled placeholder so far.
    pub fn unresolved(&self) -> usize {
        self.unresolved
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn emit_node(&mut self, forest: &Forest, id: NodeId) {
        let Some(node) = forest.node(id) else { return };
        let mut seen = HashSet::new();
        let fields: Vec<&Field> = node.fields().iter().filter(|f| seen.insert(f.name())).collect();
        if fields.is_empty() {
            return;
        }
        let ty = forest.qualified_name(id);

        let params: Vec<String> = fields.iter().map(|f| self.parameter(&ty, f)).collect();
        let args: Vec<String> = fields.iter().map(|f| format!("{0}: {0}", f.name())).collect();

        let i1 = INDENT;
        let i2 = INDENT.repeat(2);
        let i3 = INDENT.repeat(3);
        let out = &mut self.out;
        // writing into a String never fails
        let _ = writeln!(out);
        let _ = writeln!(out, "extension {ty} {{");
        let _ = writeln!(out, "{i1}static func {}(", self.function);
        let _ = writeln!(out, "{}", indent_list(&params, &i2));
        let _ = writeln!(out, "{i1}) -> {ty} {{");
        let _ = writeln!(out, "{i2}{ty}(");
        let _ = writeln!(out, "{}", indent_list(&args, &i3));
        let _ = writeln!(out, "{i2})");
        let _ = writeln!(out, "{i1}}}");
        let _ = writeln!(out, "}}");
    }

    fn parameter(&mut self, owner: &str, field: &Field) -> String {
        let name = field.name();
        let raw = field.raw_type().trim();
        if field.is_closure() {
            return if field.is_optional() {
                format!("{name}: {raw}")
            } else {
                format!("{name}: @escaping {raw}")
            };
        }
        if field.category() == Category::UnknownNonOptional {
            self.unresolved += 1;
            tracing::warn!(
                declaration = owner,
                field = name,
                raw_type = raw,
                "no default for type"
            );
        }
        let literal = self.synth.synthesize(field.category(), name);
        format!("{name}: {raw} = {literal}")
    }
}

fn indent_list(items: &[String], indent: &str) -> String {
    items
        .iter()
        .map(|item| format!("{indent}{item}"))
        .collect::<Vec<_>>()
        .join(",\n")
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::ForestBuilder;
    use pretty_assertions::assert_eq;

    fn render(forest: &Forest) -> (String, usize) {
        let mut cg = MockGen::new(Synthesizer::seeded(3));
        cg.emit(forest);
        let n = cg.unresolved();
        (cg.into_string(), n)
    }

    #[test]
    fn user_scenario_renders_factory() {
        let mut b = ForestBuilder::new();
        let user = b.create_node("User", None).unwrap();
        b.push_field(user, "id", "UUID").unwrap();
        b.push_field(user, "tags", "[String]").unwrap();
        b.push_field(user, "nickname", "String?").unwrap();
        b.push_field(user, "createdAt", "Date").unwrap();
        let (src, unresolved) = render(&b.finish());

        let want = format!("{HEADER}
extension User {{
    static func mock(
        id: UUID = UUID(),
        tags: [String] = [],
        nickname: String? = \"nickname\",
        createdAt: Date = Date(timeIntervalSince1970: 1000)
    ) -> User {{
        User(
            id: id,
            tags: tags,
            nickname: nickname,
            createdAt: createdAt
        )
    }}
}}
");
        assert_eq!(src, want);
        assert_eq!(unresolved, 0);
    }

    #[test]
    fn nested_types_use_qualified_names_and_skip_empty_nodes() {
        let mut b = ForestBuilder::new();
        b.open("Feed").unwrap();
        b.open("Item").unwrap();
        b.field("url", "URL").unwrap();
        b.field("onTap", "() -> Void").unwrap();
        b.field("onLongPress", "(() -> Void)?").unwrap();
        b.close().unwrap();
        b.close().unwrap();
        let (src, _) = render(&b.finish());

        assert!(!src.contains("extension Feed {"));
        assert!(src.contains("extension Feed.Item {"));
        assert!(src.contains("url: URL = URL(string: \"https://foo.bar/\")!,"));
        assert!(src.contains("onTap: @escaping () -> Void,"));
        assert!(src.contains("onLongPress: (() -> Void)?\n"));
        assert!(src.contains(") -> Feed.Item {"));
    }

    #[test]
    fn unresolved_fields_get_placeholders_and_are_counted() {
        let mut b = ForestBuilder::new();
        let n = b.create_node("Gadget", None).unwrap();
        b.push_field(n, "engine", "Frobnicator").unwrap();
        b.push_field(n, "spare", "Frobnicator?").unwrap();
        let (src, unresolved) = render(&b.finish());
        assert!(src.contains("engine: Frobnicator = <#default value#>,"));
        assert!(src.contains("spare: Frobnicator? = nil"));
        assert_eq!(unresolved, 1);
    }

    #[test]
    fn duplicate_field_names_emit_once() {
        let mut b = ForestBuilder::new();
        let n = b.create_node("N", None).unwrap();
        b.push_field(n, "x", "Bool").unwrap();
        b.push_field(n, "x", "String").unwrap();
        let (src, _) = render(&b.finish());
        assert_eq!(src.matches("x: Bool = false").count(), 1);
        assert!(!src.contains("x: String"));
    }

    #[test]
    fn function_name_is_configurable() {
        let mut b = ForestBuilder::new();
        let n = b.create_node("N", None).unwrap();
        b.push_field(n, "count", "Int").unwrap();
        let mut cg = MockGen::new(Synthesizer::seeded(0)).with_function_name("fixture");
        cg.emit(&b.finish());
        let src = cg.into_string();
        assert!(src.contains("static func fixture("));
        let line = src.lines().find(|l| l.contains("count: Int = ")).unwrap();
        let value: u32 = line.trim().trim_start_matches("count: Int = ").parse().unwrap();
        assert!(value <= 100);
    }

    #[test]
    fn seeded_output_is_reproducible() {
        let mut b = ForestBuilder::new();
        let n = b.create_node("N", None).unwrap();
        b.push_field(n, "ratio", "Double").unwrap();
        b.push_field(n, "price", "Decimal").unwrap();
        let forest = b.finish();
        assert_eq!(render(&forest).0, render(&forest).0);
    }
}
