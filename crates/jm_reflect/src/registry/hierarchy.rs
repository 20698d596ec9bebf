//! Inheritance: ancestor lists, subclass tables and the property metadata merge.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::iter;

use indexmap::{IndexMap, IndexSet};

use crate::info::{ClassMetadata, PropertyMetadata, TypeRef};
use crate::registry::ClassRegistry;

impl ClassRegistry {
    // Recomputes `base_class_names` of every class and the subclass table.
    pub(super) fn rebuild_hierarchy(&mut self) {
        let chains: Vec<Vec<String>> = self
            .classes
            .values()
            .map(|metadata| self.ancestor_chain(metadata))
            .collect();

        self.subclasses.clear();
        for (metadata, chain) in self.classes.values_mut().zip(chains) {
            for ancestor in &chain {
                self.subclasses
                    .entry(ancestor.clone())
                    .or_default()
                    .push(metadata.name().to_string());
            }
            metadata.base_class_names = chain;
        }
    }

    // Registered ancestors of `metadata`, root-most first.
    fn ancestor_chain(&self, metadata: &ClassMetadata) -> Vec<String> {
        let mut visited: IndexSet<&str> = IndexSet::new();
        visited.insert(metadata.name());

        let mut current = metadata.extends();
        while let Some(name) = current {
            let Some(base) = self.get(name) else {
                log::debug!(
                    "base class '{name}' of '{}' is not declared yet",
                    metadata.name()
                );
                break;
            };
            if !visited.insert(base.name()) {
                log::warn!("inheritance cycle through class '{name}'");
                break;
            }
            current = base.extends();
        }

        visited
            .into_iter()
            .skip(1)
            .rev()
            .map(ToString::to_string)
            .collect()
    }

    /// Ancestors of `class`, root-most first. Empty for unknown classes.
    pub fn base_class_names(&self, class: &str) -> &[String] {
        self.get(class)
            .map(ClassMetadata::base_class_names)
            .unwrap_or_default()
    }

    /// Registered classes deriving from `class`, directly or not, in registration order.
    pub fn subclasses(&self, class: &str) -> &[String] {
        self.subclasses
            .get(class)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `class` derives from `base`, directly or not.
    #[inline]
    pub fn is_subclass_of(&self, class: &str, base: &str) -> bool {
        self.base_class_names(class).iter().any(|name| name == base)
    }

    /// Whether `class` or one of its ancestors was declared with auto-predicate.
    pub fn uses_auto_predicate(&self, class: &str) -> bool {
        iter::once(class)
            .chain(self.base_class_names(class).iter().map(String::as_str))
            .filter_map(|name| self.get(name))
            .any(|metadata| metadata.options().auto_predicate)
    }

    /// The declared type of field `key` on `class`, looked up from the class
    /// towards the root.
    pub fn field_type(&self, class: &str, key: &str) -> Option<&TypeRef> {
        iter::once(class)
            .chain(self.base_class_names(class).iter().rev().map(String::as_str))
            .filter_map(|name| self.get(name))
            .find_map(|metadata| metadata.field_type(key))
    }

    /// The property metadata of `class`, including inherited properties.
    ///
    /// Ancestors are folded root-most first and the class's own declarations
    /// last, so the most derived declaration of a key wins. See
    /// [`PropertyMetadata::merge_over`] for the attribute-wise merge.
    /// Keys keep the order in which they were first declared.
    ///
    /// Returns `None` when the class is unknown, or declares no properties and
    /// has no ancestors.
    ///
    /// # Examples
    ///
    /// ```
    /// use jm_reflect::info::{PropertyOptions, TypeRef};
    /// use jm_reflect::registry::{ClassDeclaration, ClassRegistry};
    ///
    /// let mut registry = ClassRegistry::new();
    /// registry.register(
    ///     ClassDeclaration::new("LivingBeing")
    ///         .property_with("id", TypeRef::Number, PropertyOptions::new().required(true)),
    /// );
    /// registry.register(
    ///     ClassDeclaration::new("Employee")
    ///         .extends("LivingBeing")
    ///         .property("name", TypeRef::String)
    ///         .property_with("id", TypeRef::Number, "employeeId"),
    /// );
    ///
    /// let merged = registry.merged_properties("Employee").unwrap();
    /// let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
    /// assert_eq!(keys, ["id", "name"]);
    /// assert_eq!(merged["id"].name().as_single(), Some("employeeId"));
    /// assert!(merged["id"].is_required());
    /// ```
    pub fn merged_properties(&self, class: &str) -> Option<IndexMap<String, PropertyMetadata>> {
        let metadata = self.get(class)?;
        if metadata.properties().is_empty() && metadata.base_class_names().is_empty() {
            return None;
        }

        let mut merged: IndexMap<String, PropertyMetadata> = IndexMap::new();
        let layers = metadata
            .base_class_names()
            .iter()
            .filter_map(|name| self.get(name))
            .chain(iter::once(metadata));

        for layer in layers {
            for (key, property) in layer.properties() {
                match merged.get_mut(key) {
                    Some(inherited) => *inherited = property.merge_over(inherited),
                    None => {
                        merged.insert(key.clone(), property.clone());
                    }
                }
            }
        }

        Some(merged)
    }
}

// -----------------------------------------------------------------------------
// Tests
