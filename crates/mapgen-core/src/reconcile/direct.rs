//! Direct rename tables from a two-namespace source.

use super::{ordered_classes, put_last_wins, ClassTable, Output, RenameTable};
use crate::tree::{to_dotted, MappingTree, NamespaceId};
use tracing::trace;

/// Emits `source → target` for every renamed class and method
///
/// Classes are keyed by dotted source name. Methods go into a flat table keyed
/// by source method name.
pub fn reconcile(tree: &MappingTree, source: NamespaceId, target: NamespaceId) -> Output {
    let mut classes = RenameTable::new();
    let mut methods = RenameTable::new();

    for class in ordered_classes(tree) {
        let src = to_dotted(class.name(source));
        let dst = to_dotted(class.name(target));
        if src != dst {
            classes.insert(src, dst);
        } else {
            trace!("Class {} unchanged", src);
        }

        for method in tree.methods_of(class) {
            let src = method.name(source);
            let dst = method.name(target);
            if src != dst {
                put_last_wins(&mut methods, src, dst);
            }
        }
    }

    Output {
        classes: Some(ClassTable::Renames(classes)),
        methods: Some(methods),
    }
}
