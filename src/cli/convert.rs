//! CQL AST -> JSON conversion

use crate::ast::{Clause, ClauseKind, Modifier, Prefix, Query, SearchClause, Sort};
use serde_json::{Map, Value, json};

/// Convert a parsed query to JSON.
///
/// Empty fields are left out. A match-all clause has neither
/// `searchClause` nor `boolClause`.
pub fn query_to_json(query: &Query) -> Value {
    let mut object = Map::new();
    object.insert("clause".to_string(), clause_to_json(&query.clause));
    if !query.sort_spec.is_empty() {
        object.insert(
            "sortSpec".to_string(),
            Value::Array(query.sort_spec.iter().map(sort_to_json).collect()),
        );
    }
    Value::Object(object)
}

fn clause_to_json(clause: &Clause) -> Value {
    let mut object = Map::new();
    if !clause.prefixes.is_empty() {
        object.insert(
            "prefixes".to_string(),
            Value::Array(clause.prefixes.iter().map(prefix_to_json).collect()),
        );
    }
    match &clause.kind {
        ClauseKind::Search(search) => {
            object.insert("searchClause".to_string(), search_to_json(search));
        }
        ClauseKind::Boolean(boolean) => {
            let mut inner = Map::new();
            inner.insert("left".to_string(), clause_to_json(&boolean.left));
            inner.insert("operator".to_string(), json!(boolean.operator.as_str()));
            insert_modifiers(&mut inner, &boolean.modifiers);
            inner.insert("right".to_string(), clause_to_json(&boolean.right));
            object.insert("boolClause".to_string(), Value::Object(inner));
        }
        ClauseKind::MatchAll => {}
    }
    Value::Object(object)
}

fn search_to_json(search: &SearchClause) -> Value {
    let mut object = Map::new();
    insert_non_empty(&mut object, "index", &search.index);
    insert_non_empty(&mut object, "relation", &search.relation);
    insert_modifiers(&mut object, &search.modifiers);
    object.insert("term".to_string(), json!(search.term));
    Value::Object(object)
}

fn prefix_to_json(prefix: &Prefix) -> Value {
    let mut object = Map::new();
    insert_non_empty(&mut object, "name", &prefix.name);
    object.insert("uri".to_string(), json!(prefix.uri));
    Value::Object(object)
}

fn sort_to_json(sort: &Sort) -> Value {
    let mut object = Map::new();
    object.insert("index".to_string(), json!(sort.index));
    insert_modifiers(&mut object, &sort.modifiers);
    Value::Object(object)
}

fn modifier_to_json(modifier: &Modifier) -> Value {
    let mut object = Map::new();
    object.insert("name".to_string(), json!(modifier.name));
    insert_non_empty(&mut object, "relation", &modifier.relation);
    insert_non_empty(&mut object, "value", &modifier.value);
    Value::Object(object)
}

fn insert_modifiers(object: &mut Map<String, Value>, modifiers: &[Modifier]) {
    if !modifiers.is_empty() {
        object.insert(
            "modifiers".to_string(),
            Value::Array(modifiers.iter().map(modifier_to_json).collect()),
        );
    }
}

fn insert_non_empty(object: &mut Map<String, Value>, key: &str, value: &str) {
    if !value.is_empty() {
        object.insert(key.to_string(), json!(value));
    }
}
