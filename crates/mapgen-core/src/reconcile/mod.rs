//! Reconciliation of mapping trees into rename tables.
//!
//! Every policy walks classes, then methods, filters, optionally joins against
//! a reference tree, filters again and emits into key-sorted tables. Output
//! ordering depends only on the key strings.
//!
//! | Policy | Input | Output |
//! |--------|-------|--------|
//! | [`direct`] | one tree, source → target | `classes`, `methods` |
//! | [`layered`] | one tree, intermediate → final | `classes`, `methods` |
//! | [`crossref`] | project tree joined with a reference tree | `methods` |
//! | [`aggregate`] | reference tree | `classes` with nested methods |
//!
//! The flat `methods` tables of [`direct`] and [`layered`] are not qualified by
//! class. When two classes rename a same-named method differently the later
//! class in source-name order overwrites the earlier one.

pub mod aggregate;
pub mod crossref;
pub mod direct;
pub mod layered;

use crate::tree::{ClassEntry, MappingTree};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Flat, key-sorted table of renames
pub type RenameTable = BTreeMap<String, String>;

/// A renamed method nested under its class
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct MethodMapping {
    /// Obfuscated method name
    pub obfuscated: String,
    /// Mapped method name
    pub mapped: String,
    /// Obfuscated descriptor
    pub descriptor: String,
}

/// A class with its mapped name and method renames
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassMapping {
    /// Obfuscated class name, dotted
    pub obfuscated: String,
    /// Mapped class name, dotted
    pub mapped: String,
    /// Renamed methods, sorted by obfuscated name, then mapped name, then descriptor
    pub methods: Vec<MethodMapping>,
}

/// The `classes` table of an output document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ClassTable {
    /// Class name → class name
    Renames(RenameTable),
    /// Obfuscated class name → class with nested method renames
    Aggregates(BTreeMap<String, ClassMapping>),
}

/// One generator's output document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Output {
    /// Class table, if the policy emits one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<ClassTable>,
    /// Flat method table, if the policy emits one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub methods: Option<RenameTable>,
}

impl Output {
    /// Number of class entries
    pub fn class_count(&self) -> usize {
        match &self.classes {
            Some(ClassTable::Renames(table)) => table.len(),
            Some(ClassTable::Aggregates(table)) => table.len(),
            None => 0,
        }
    }

    /// Number of flat method entries
    pub fn method_count(&self) -> usize {
        self.methods.as_ref().map_or(0, BTreeMap::len)
    }
}

/// Classes of `tree` sorted by source name
///
/// Fixes which entry wins a collision in the flat method tables.
fn ordered_classes(tree: &MappingTree) -> Vec<&ClassEntry> {
    let mut classes: Vec<&ClassEntry> = tree.classes().collect();
    classes.sort_unstable_by(|a, b| a.src_name().cmp(b.src_name()));
    classes
}

/// Inserts into a flat table, overwriting any earlier value for `key`
fn put_last_wins(table: &mut RenameTable, key: &str, value: &str) {
    if let Some(previous) = table.insert(key.to_string(), value.to_string()) {
        if previous != value {
            debug!("Method rename collision: {} -> {} replaces {}", key, value, previous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_method_mapping_order() {
        let method = |obfuscated: &str, mapped: &str, descriptor: &str| MethodMapping {
            obfuscated: obfuscated.to_string(),
            mapped: mapped.to_string(),
            descriptor: descriptor.to_string(),
        };
        let mut methods = vec![
            method("b", "alpha", "()V"),
            method("a", "stop", "()V"),
            method("a", "run", "(I)V"),
            method("a", "run", "()V"),
        ];
        methods.sort();

        assert_eq!(
            methods,
            vec![
                method("a", "run", "()V"),
                method("a", "run", "(I)V"),
                method("a", "stop", "()V"),
                method("b", "alpha", "()V"),
            ]
        );
    }

    #[test]
    fn test_output_shape() {
        let mut methods = RenameTable::new();
        methods.insert("doThing".to_string(), "run".to_string());
        let output = Output {
            classes: None,
            methods: Some(methods),
        };

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({ "methods": { "doThing": "run" } })
        );
    }

    #[test]
    fn test_aggregate_shape() {
        let mut classes = BTreeMap::new();
        classes.insert(
            "a".to_string(),
            ClassMapping {
                obfuscated: "a".to_string(),
                mapped: "com.example.Foo".to_string(),
                methods: vec![MethodMapping {
                    obfuscated: "m".to_string(),
                    mapped: "run".to_string(),
                    descriptor: "()V".to_string(),
                }],
            },
        );
        let output = Output {
            classes: Some(ClassTable::Aggregates(classes)),
            methods: None,
        };

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({
                "classes": {
                    "a": {
                        "obfuscated": "a",
                        "mapped": "com.example.Foo",
                        "methods": [{ "obfuscated": "m", "mapped": "run", "descriptor": "()V" }]
                    }
                }
            })
        );
    }

    #[test]
    fn test_put_last_wins() {
        let mut table = RenameTable::new();
        put_last_wins(&mut table, "a", "first");
        put_last_wins(&mut table, "a", "second");
        assert_eq!(table.get("a").map(String::as_str), Some("second"));
    }
}
