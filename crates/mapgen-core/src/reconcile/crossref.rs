//! Project names → official names, joined through obfuscated names.
//!
//! Both trees must share their source namespace (obfuscated names), so a
//! project method and its reference counterpart have the same [`MethodKey`].
//!
//! [`MethodKey`]: crate::tree::MethodKey

use super::{ordered_classes, Output, RenameTable};
use crate::tree::{MappingTree, NamespaceId};
use tracing::{debug, trace, warn};

/// Default prefix of names the project generates for synthetic members
pub const DEFAULT_EXCLUDED_PREFIX: &str = "f_";

/// Counters describing one cross-reference run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinStats {
    /// Renamed project methods considered for the join
    pub candidates: usize,
    /// Methods absent from the reference tree
    pub missing: usize,
    /// Methods whose project name already equals the official name
    pub identical: usize,
    /// Methods dropped by the excluded prefix
    pub excluded: usize,
    /// Entries written to the table
    pub emitted: usize,
}

/// Joins every renamed method of `project` against `reference`
///
/// Emits `project name → official name`. Methods missing from the reference
/// are reported and skipped; identity renames and names starting with
/// `excluded_prefix` are skipped silently.
pub fn reconcile(
    project: &MappingTree,
    named: NamespaceId,
    reference: &MappingTree,
    official: NamespaceId,
    excluded_prefix: &str,
) -> (Output, JoinStats) {
    let mut methods = RenameTable::new();
    let mut stats = JoinStats::default();

    for class in ordered_classes(project) {
        for method in project.methods_of(class) {
            let obf_name = method.src_name();
            let named_name = method.name(named);
            if named_name == obf_name {
                continue;
            }
            stats.candidates += 1;

            let Some(mapping) = reference.method_by_key(method.key()) else {
                warn!(
                    "MISSING:  {}#{} -> {} = ???",
                    method.owner(),
                    obf_name,
                    named_name
                );
                stats.missing += 1;
                continue;
            };

            let official_name = mapping.name(official);
            if named_name == official_name {
                stats.identical += 1;
                continue;
            }
            if named_name.starts_with(excluded_prefix) {
                trace!("Excluding {}", named_name);
                stats.excluded += 1;
                continue;
            }

            methods.insert(named_name.to_string(), official_name.to_string());
            stats.emitted += 1;
        }
    }

    debug!("Cross-reference: {:?}", stats);

    let output = Output {
        classes: None,
        methods: Some(methods),
    };
    (output, stats)
}
