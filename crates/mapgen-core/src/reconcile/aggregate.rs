//! Class-aggregate tables: each class with its nested method renames.

use super::{ClassMapping, ClassTable, MethodMapping, Output};
use crate::tree::{to_dotted, MappingTree, NamespaceId};
use std::collections::BTreeMap;

/// Emits every class that is renamed or owns at least one renamed method
///
/// Keyed by dotted source name. A class whose own name is unchanged is still
/// emitted when any of its methods is renamed.
pub fn reconcile(tree: &MappingTree, mapped: NamespaceId) -> Output {
    let mut classes = BTreeMap::new();

    for class in tree.classes() {
        let obfuscated = to_dotted(class.src_name());
        let mapped_name = to_dotted(class.name(mapped));

        let mut methods: Vec<MethodMapping> = tree
            .methods_of(class)
            .filter(|m| m.src_name() != m.name(mapped))
            .map(|m| MethodMapping {
                obfuscated: m.src_name().to_string(),
                mapped: m.name(mapped).to_string(),
                descriptor: m.src_descriptor().to_string(),
            })
            .collect();

        if obfuscated == mapped_name && methods.is_empty() {
            continue;
        }
        methods.sort();

        classes.insert(
            obfuscated.clone(),
            ClassMapping {
                obfuscated,
                mapped: mapped_name,
                methods,
            },
        );
    }

    Output {
        classes: Some(ClassTable::Aggregates(classes)),
        methods: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reconcile() {
        let mut tree = MappingTree::with_namespaces(["obfuscated", "official"]);
        tree.add_class(["a", "com/example/Foo"]);
        tree.add_class(["Main", "Main"]);
        tree.add_class(["Untouched", "Untouched"]);
        tree.add_method("a", ["m", "run"], "()V");
        tree.add_method("a", ["b", "b"], "()V");
        tree.add_method("Main", ["z", "start"], "(I)V");
        tree.add_method("Main", ["c", "stop"], "()V");
        tree.add_method("Untouched", ["equals", "equals"], "(Ljava/lang/Object;)Z");

        let output = reconcile(&tree, tree.namespace("official").unwrap());

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({
                "classes": {
                    "Main": {
                        "obfuscated": "Main",
                        "mapped": "Main",
                        "methods": [
                            { "obfuscated": "c", "mapped": "stop", "descriptor": "()V" },
                            { "obfuscated": "z", "mapped": "start", "descriptor": "(I)V" }
                        ]
                    },
                    "a": {
                        "obfuscated": "a",
                        "mapped": "com.example.Foo",
                        "methods": [
                            { "obfuscated": "m", "mapped": "run", "descriptor": "()V" }
                        ]
                    }
                }
            })
        );
    }
}
