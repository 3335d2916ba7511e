// JSON debug view of a classified forest.

use serde_json::{json, Value};

use crate::forest::{Field, Forest, NodeId};

pub fn emit_schema(forest: &Forest) -> Value {
    Value::Array(forest.roots().iter().map(|&id| emit_node(forest, id)).collect())
}

fn emit_node(forest: &Forest, id: NodeId) -> Value {
    let Some(node) = forest.node(id) else { return Value::Null };
    json!({
        "name": node.name(),
        "qualified_name": forest.qualified_name(id),
        "fields": node.fields().iter().map(emit_field).collect::<Vec<_>>(),
        "children": node.children().iter().map(|&c| emit_node(forest, c)).collect::<Vec<_>>(),
    })
}

fn emit_field(field: &Field) -> Value {
    json!({
        "name": field.name(),
        "type": field.raw_type(),
        "category": field.category(),
        "closure": field.is_closure(),
        "optional": field.is_optional(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::ForestBuilder;

    #[test]
    fn schema_nests_children_and_names_categories() {
        let mut b = ForestBuilder::new();
        b.open("User").unwrap();
        b.field("id", "UUID").unwrap();
        b.open("Prefs").unwrap();
        b.field("onChange", "((Bool) -> Void)?").unwrap();
        b.close().unwrap();
        b.close().unwrap();
        let schema = emit_schema(&b.finish());

        assert_eq!(schema[0]["name"], "User");
        assert_eq!(schema[0]["fields"][0]["category"], "uuid");
        let prefs = &schema[0]["children"][0];
        assert_eq!(prefs["qualified_name"], "User.Prefs");
        assert_eq!(prefs["fields"][0]["closure"], true);
        assert_eq!(prefs["fields"][0]["optional"], true);
        assert_eq!(prefs["fields"][0]["category"], "unknown_optional");
    }

    #[test]
    fn keys_keep_insertion_order() {
        let mut b = ForestBuilder::new();
        b.open("A").unwrap();
        b.close().unwrap();
        let text = serde_json::to_string(&emit_schema(&b.finish())).unwrap();
        assert!(text.starts_with(r#"[{"name":"A","qualified_name":"A","fields":[],"children":[]}"#));
    }
}
