//! Intermediate → final renames from a three-namespace source.

use super::{ordered_classes, put_last_wins, ClassTable, Output, RenameTable};
use crate::tree::{to_dotted, MappingTree, NamespaceId};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Default pattern of compiler-generated anonymous classes
pub const SYNTHETIC_CLASS_PATTERN: &str = r"^.+\$[0-9]+$";

static DEFAULT_SYNTHETIC_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SYNTHETIC_CLASS_PATTERN).expect("valid synthetic class pattern"));

/// Returns the compiled default synthetic class pattern
pub fn default_synthetic_class() -> &'static Regex {
    &DEFAULT_SYNTHETIC_CLASS
}

/// Emits `intermediate → final` for renamed classes and their renamed methods
///
/// Classes whose intermediate name is unchanged or matches `synthetic_class`
/// are skipped together with their methods.
pub fn reconcile(
    tree: &MappingTree,
    intermediate: NamespaceId,
    final_ns: NamespaceId,
    synthetic_class: &Regex,
) -> Output {
    let mut classes = RenameTable::new();
    let mut methods = RenameTable::new();

    for class in ordered_classes(tree) {
        let from = to_dotted(class.name(intermediate));
        let to = to_dotted(class.name(final_ns));

        if from == to {
            continue;
        }
        if synthetic_class.is_match(&from) {
            trace!("Skipping synthetic class {}", from);
            continue;
        }

        for method in tree.methods_of(class) {
            let from = method.name(intermediate);
            let to = method.name(final_ns);
            if from != to {
                put_last_wins(&mut methods, from, to);
            }
        }

        classes.insert(from, to);
    }

    Output {
        classes: Some(ClassTable::Renames(classes)),
        methods: Some(methods),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn yarn() -> MappingTree {
        let mut tree = MappingTree::with_namespaces(["official", "intermediary", "named"]);
        tree.add_class(["a", "net/minecraft/class_1", "net/minecraft/world/World"]);
        tree.add_class(["b", "net/minecraft/class_2$1", "net/minecraft/world/World$Inner"]);
        tree.add_class(["c", "net/minecraft/class_3", "net/minecraft/class_3"]);
        tree.add_method("a", ["x", "method_1", "tick"], "()V");
        tree.add_method("a", ["y", "method_2", "method_2"], "()V");
        tree.add_method("b", ["z", "method_3", "anonymous"], "()V");
        tree.add_method("c", ["w", "method_4", "unreached"], "()V");
        tree
    }

    #[test]
    fn test_reconcile() {
        let tree = yarn();
        let output = reconcile(
            &tree,
            tree.namespace("intermediary").unwrap(),
            tree.namespace("named").unwrap(),
            default_synthetic_class(),
        );

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({
                "classes": { "net.minecraft.class_1": "net.minecraft.world.World" },
                "methods": { "method_1": "tick" }
            })
        );
    }

    #[test]
    fn test_empty_final_name_is_not_a_rename() {
        let tiny = "v1\tofficial\tintermediary\tnamed\n\
CLASS\ta\tnet/minecraft/class_1\tnet/minecraft/World\n\
CLASS\tb\tnet/minecraft/class_2\t\n\
METHOD\ta\t()V\tc\tmethod_1\t\n\
METHOD\ta\t()V\td\tmethod_2\ttick\n";
        let mut tree = MappingTree::new();
        crate::format::read(tiny.as_bytes(), crate::format::MappingFormat::Tiny, &mut tree, None)
            .unwrap();

        let output = reconcile(
            &tree,
            tree.namespace("intermediary").unwrap(),
            tree.namespace("named").unwrap(),
            default_synthetic_class(),
        );

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({
                "classes": { "net.minecraft.class_1": "net.minecraft.World" },
                "methods": { "method_2": "tick" }
            })
        );
    }

    #[test]
    fn test_synthetic_pattern() {
        let re = default_synthetic_class();
        assert!(re.is_match("net.minecraft.class_2$1"));
        assert!(re.is_match("b$12"));
        assert!(!re.is_match("net.minecraft.class_2$Inner"));
        assert!(!re.is_match("$1"));
    }
}
