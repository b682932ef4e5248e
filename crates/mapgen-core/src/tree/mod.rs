//! In-memory multi-namespace symbol mapping tree.
//!
//! A [`MappingTree`] holds, for every class, its name in each declared
//! namespace, and for every method its owner, descriptor and per-namespace
//! names. Namespace 0 is the *source* namespace: classes are keyed by their
//! source name and methods by the composite [`MethodKey`] of source owner,
//! source name and source descriptor.
//!
//! Namespaces are addressed by name through [`MappingTree::namespace`], which
//! resolves to a [`NamespaceId`] once up front instead of passing raw
//! positional indices around.
//!
//! Names are stored verbatim as the mapping source gives them (internal
//! `/`-separated form). Callers normalize with [`to_dotted`] when reading out.

mod descriptor;

use crate::error::{Error, Result};
use std::collections::HashMap;
use tracing::trace;

pub use descriptor::{java_method_descriptor, java_type_to_descriptor, remap_descriptor, to_dotted};

/// Handle to a namespace declared by a [`MappingTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamespaceId(usize);

impl NamespaceId {
    /// The source namespace every tree is keyed by
    pub const SOURCE: NamespaceId = NamespaceId(0);

    /// Positional index of this namespace within its tree
    pub fn index(self) -> usize {
        self.0
    }
}

/// Composite lookup key of a method: source owner, source name, source descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodKey {
    /// Owning class name in the source namespace
    pub owner: String,
    /// Method name in the source namespace
    pub name: String,
    /// Descriptor in the source namespace
    pub descriptor: String,
}

impl MethodKey {
    /// Creates a new method key
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

/// Name of a symbol in the given namespace, falling back to the nearest
/// earlier namespace with a non-empty name (ultimately the source name).
fn name_in(names: &[String], ns: NamespaceId) -> &str {
    let end = ns.0.min(names.len().saturating_sub(1));
    names[..=end]
        .iter()
        .rev()
        .find(|name| !name.is_empty())
        .unwrap_or(&names[0])
}

/// A class and its names in each namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
    names: Vec<String>,
    methods: Vec<MethodKey>,
}

impl ClassEntry {
    /// Name in the source namespace
    pub fn src_name(&self) -> &str {
        &self.names[0]
    }

    /// Name in `ns`, or the source name when unmapped
    pub fn name(&self, ns: NamespaceId) -> &str {
        name_in(&self.names, ns)
    }

    /// Keys of the methods owned by this class, in insertion order
    pub fn method_keys(&self) -> &[MethodKey] {
        &self.methods
    }
}

/// A method and its names in each namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodEntry {
    key: MethodKey,
    names: Vec<String>,
}

impl MethodEntry {
    /// Source name of the owning class
    pub fn owner(&self) -> &str {
        &self.key.owner
    }

    /// Name in the source namespace
    pub fn src_name(&self) -> &str {
        &self.key.name
    }

    /// Descriptor in the source namespace
    pub fn src_descriptor(&self) -> &str {
        &self.key.descriptor
    }

    /// Name in `ns`, or the source name when unmapped
    pub fn name(&self, ns: NamespaceId) -> &str {
        name_in(&self.names, ns)
    }

    /// Composite lookup key of this method
    pub fn key(&self) -> &MethodKey {
        &self.key
    }
}

/// Multi-namespace table of class and method mappings
#[derive(Debug, Clone, Default)]
pub struct MappingTree {
    namespaces: Vec<String>,
    classes: HashMap<String, ClassEntry>,
    methods: HashMap<MethodKey, MethodEntry>,
}

impl MappingTree {
    /// Creates an empty tree with no declared namespaces
    ///
    /// The first mapping source read into it declares the namespaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree with the given namespaces, source first
    pub fn with_namespaces<I, S>(namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespaces: namespaces.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Declared namespace names, source first
    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    /// Adopts `namespaces` if none are declared yet, otherwise checks they match
    pub fn declare_namespaces(&mut self, namespaces: &[String]) -> Result<()> {
        if self.namespaces.is_empty() {
            self.namespaces = namespaces.to_vec();
            Ok(())
        } else if self.namespaces == namespaces {
            Ok(())
        } else {
            Err(Error::namespace_mismatch(&self.namespaces, namespaces))
        }
    }

    /// Resolves a namespace by name
    pub fn namespace(&self, name: &str) -> Result<NamespaceId> {
        self.namespaces
            .iter()
            .position(|ns| ns == name)
            .map(NamespaceId)
            .ok_or_else(|| Error::unknown_namespace(name, &self.namespaces))
    }

    /// Renames a declared namespace
    pub fn rename_namespace(&mut self, from: &str, to: impl Into<String>) -> Result<()> {
        let id = self.namespace(from)?;
        self.namespaces[id.0] = to.into();
        Ok(())
    }

    /// Inserts a class, or overwrites the names of an existing one with the same source name
    ///
    /// `names` lists the class name per namespace, source first. Missing trailing
    /// names resolve to the source name on lookup.
    pub fn add_class<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let Some(src) = names.first().cloned() else {
            return;
        };

        match self.classes.get_mut(&src) {
            Some(existing) => {
                trace!("Overwriting class {}", src);
                existing.names = names;
            }
            None => {
                self.classes.insert(
                    src,
                    ClassEntry {
                        names,
                        methods: Vec::new(),
                    },
                );
            }
        }
    }

    /// Inserts a method scoped to `owner`, creating a bare class entry if needed
    ///
    /// `names` lists the method name per namespace, source first. A method with the
    /// same (owner, source name, descriptor) is overwritten in place.
    pub fn add_method<I, S>(&mut self, owner: &str, names: I, descriptor: impl Into<String>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let Some(src) = names.first() else {
            return;
        };
        let key = MethodKey::new(owner, src.as_str(), descriptor);

        let class = self
            .classes
            .entry(owner.to_string())
            .or_insert_with(|| ClassEntry {
                names: vec![owner.to_string()],
                methods: Vec::new(),
            });

        match self.methods.get_mut(&key) {
            Some(existing) => existing.names = names,
            None => {
                class.methods.push(key.clone());
                self.methods.insert(key.clone(), MethodEntry { key, names });
            }
        }
    }

    /// Looks up a class by its source name
    pub fn class(&self, src_name: &str) -> Option<&ClassEntry> {
        self.classes.get(src_name)
    }

    /// Looks up a method by source owner, source name and source descriptor
    pub fn method(&self, owner: &str, name: &str, descriptor: &str) -> Option<&MethodEntry> {
        self.method_by_key(&MethodKey::new(owner, name, descriptor))
    }

    /// Looks up a method by its composite key
    pub fn method_by_key(&self, key: &MethodKey) -> Option<&MethodEntry> {
        self.methods.get(key)
    }

    /// All classes, in unspecified order
    pub fn classes(&self) -> impl Iterator<Item = &ClassEntry> + '_ {
        self.classes.values()
    }

    /// Methods of `class`, in insertion order
    pub fn methods_of<'a>(
        &'a self,
        class: &'a ClassEntry,
    ) -> impl Iterator<Item = &'a MethodEntry> + 'a {
        class
            .methods
            .iter()
            .filter_map(move |key| self.methods.get(key))
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if the tree holds no classes
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Number of methods across all classes
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Merges every class of `other` into this tree
    ///
    /// Classes present in both take the names from `other`; their methods are
    /// merged, with `other` winning for methods present in both.
    pub fn merge(&mut self, other: &MappingTree) -> Result<()> {
        self.declare_namespaces(&other.namespaces)?;

        for class in other.classes() {
            self.add_class(class.names.iter().cloned());
            for method in other.methods_of(class) {
                self.add_method(
                    &method.key.owner,
                    method.names.iter().cloned(),
                    method.key.descriptor.clone(),
                );
            }
        }

        Ok(())
    }

    /// Returns a copy of this tree re-rooted on namespace `ns`
    ///
    /// The new source namespace is `ns`; the old source namespace takes its slot.
    /// Descriptors are rewritten into the new source namespace using this tree's
    /// own class mappings.
    pub fn switch_source(&self, ns: NamespaceId) -> MappingTree {
        if ns == NamespaceId::SOURCE {
            return self.clone();
        }

        let swap = |names: &[String]| -> Vec<String> {
            let mut swapped: Vec<String> = (0..self.namespaces.len())
                .map(|i| name_in(names, NamespaceId(i)).to_string())
                .collect();
            if ns.0 < swapped.len() {
                swapped.swap(0, ns.0);
            }
            swapped
        };

        let mut namespaces = self.namespaces.clone();
        namespaces.swap(0, ns.0);
        let mut switched = MappingTree::with_namespaces(namespaces);

        for class in self.classes() {
            switched.add_class(swap(&class.names));
        }

        for class in self.classes() {
            let owner = class.name(ns);
            for method in self.methods_of(class) {
                let descriptor = remap_descriptor(&method.key.descriptor, |name| {
                    self.classes.get(name).map(|c| c.name(ns))
                });
                switched.add_method(owner, swap(&method.names), descriptor);
            }
        }

        switched
    }
}
