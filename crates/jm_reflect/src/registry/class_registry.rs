use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use crate::info::{ClassMetadata, PropertyMetadata, TypeRef};
use crate::registry::{ClassDeclaration, RegistryError};
use crate::{Instance, Value};

// -----------------------------------------------------------------------------
// ClassRegistry

/// The store of declared classes.
///
/// Classes are registered once, at startup; the registry is then frozen behind
/// an [`Arc`] and only read. Registration order does not matter: ancestor
/// lists are recomputed for every class whenever one is registered.
///
/// # Examples
///
/// ```
/// use jm_reflect::info::TypeRef;
/// use jm_reflect::registry::{ClassDeclaration, ClassRegistry};
///
/// let mut registry = ClassRegistry::new();
/// assert!(registry.register(ClassDeclaration::new("Animal").property("name", TypeRef::String)));
/// assert!(registry.register(ClassDeclaration::new("Panther").extends("Animal")));
///
/// // A second declaration of the same class is ignored.
/// assert!(!registry.register(ClassDeclaration::new("Animal")));
///
/// assert!(registry.is_tracked(&TypeRef::class("Panther")));
/// assert!(registry.is_subclass_of("Panther", "Animal"));
/// assert_eq!(registry.subclasses("Animal"), ["Panther"]);
/// ```
#[derive(Clone, Default)]
pub struct ClassRegistry {
    pub(super) classes: IndexMap<String, ClassMetadata>,
    pub(super) subclasses: IndexMap<String, Vec<String>>,
}

impl ClassRegistry {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self {
            classes: IndexMap::new(),
            subclasses: IndexMap::new(),
        }
    }

    /// The process-wide registry, built on first access from the
    /// [auto-registered](crate::auto_register) declarations.
    pub fn global() -> &'static Arc<ClassRegistry> {
        static GLOBAL: OnceLock<Arc<ClassRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let mut registry = ClassRegistry::new();
            if !registry.auto_register() {
                log::debug!("auto registration is unavailable, the global class registry is empty");
            }
            Arc::new(registry)
        })
    }

    /// Try add or do nothing.
    ///
    /// - If a class with the same name exists, nothing happens and `false` is returned.
    /// - Otherwise the declaration is stored and `true` is returned.
    pub fn register(&mut self, declaration: ClassDeclaration) -> bool {
        if self.classes.contains_key(declaration.name()) {
            log::debug!("class '{}' is already registered", declaration.name());
            return false;
        }
        self.insert(declaration);
        true
    }

    /// Insert or **Overwrite** the declaration of a class.
    pub fn insert(&mut self, declaration: ClassDeclaration) {
        let metadata = declaration.into_metadata();
        if self.classes.contains_key(metadata.name()) {
            log::warn!("class '{}' is declared again, overwriting", metadata.name());
        }
        self.classes.insert(metadata.name().to_string(), metadata);
        self.rebuild_hierarchy();
    }

    /// Registers every declaration submitted with [`auto_register!`](crate::auto_register).
    ///
    /// Repeated calls do not insert duplicates. Returns `false` when the
    /// `auto_register` feature is disabled.
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) -> bool {
        use crate::__macro_exports::auto_register::{__AutoRegisterClass, inventory};

        for declare in inventory::iter::<__AutoRegisterClass> {
            self.register((declare.0)());
        }
        true
    }

    /// Does nothing, the `auto_register` feature is disabled.
    #[cfg(not(feature = "auto_register"))]
    #[inline(always)]
    pub fn auto_register(&mut self) -> bool {
        false
    }

    /// Whether the class `name` has been declared.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&ClassMetadata> {
        self.classes.get(name)
    }

    /// Like [`get`](Self::get), for a [`TypeRef`], with the reason of a failed lookup.
    pub fn try_get(&self, ty: &TypeRef) -> Result<&ClassMetadata, RegistryError> {
        let name = ty
            .class_name()
            .ok_or_else(|| RegistryError::NotAClass(ty.clone()))?;
        self.get(name)
            .ok_or_else(|| RegistryError::UnknownClass(name.into()))
    }

    /// Whether values of `ty` are instances of a declared class.
    #[inline]
    pub fn is_tracked(&self, ty: &TypeRef) -> bool {
        self.try_get(ty).is_ok()
    }

    /// The properties declared by `class` itself.
    #[inline]
    pub fn property_metadata(&self, class: &str) -> Option<&IndexMap<String, PropertyMetadata>> {
        self.get(class).map(ClassMetadata::properties)
    }

    /// Iterates over the declared classes, in registration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ClassMetadata> {
        self.classes.values()
    }

    /// Creates an instance of `ty`.
    ///
    /// A declared constructor is called with `args`. Otherwise the instance gets
    /// the initializers of the class and its ancestors, root-most first, then
    /// the constructor arguments at their mapped fields; a missing argument
    /// assigns `Undefined`. A class without a mapping uses its nearest
    /// ancestor's.
    ///
    /// Types that are not declared classes give a plain object.
    pub fn instantiate(&self, ty: &TypeRef, args: &[Value]) -> Instance {
        let Some(class) = ty.class_name() else {
            return Instance::new();
        };
        let Some(metadata) = self.get(class) else {
            log::debug!("instantiating undeclared class '{class}'");
            return Instance::of_class(class.to_string());
        };

        if let Some(constructor) = metadata.constructor() {
            let mut instance = constructor.call(args);
            if instance.class_name().is_none() {
                instance.set_class(Some(metadata.name.clone()));
            }
            return instance;
        }

        let mut instance = Instance::of_class(metadata.name.clone());

        for name in metadata.base_class_names() {
            if let Some(base) = self.get(name) {
                for (key, value) in base.initializers() {
                    instance.set(key.as_str(), value.clone());
                }
            }
        }
        for (key, value) in metadata.initializers() {
            instance.set(key.as_str(), value.clone());
        }

        let mapping = core::iter::once(metadata)
            .chain(
                metadata
                    .base_class_names()
                    .iter()
                    .rev()
                    .filter_map(|name| self.get(name)),
            )
            .map(ClassMetadata::constructor_mapping)
            .find(|mapping| !mapping.is_empty());

        if let Some(mapping) = mapping {
            for (index, key) in mapping {
                instance.set(key.as_str(), args.get(*index).cloned().unwrap_or_default());
            }
        }

        instance
    }
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.classes.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// ClassRegistryArc

/// A shared, lockable registry, for hosts that keep declaring classes at runtime.
#[derive(Clone, Default)]
pub struct ClassRegistryArc {
    /// The wrapped [`ClassRegistry`].
    pub internal: Arc<RwLock<ClassRegistry>>,
}

impl ClassRegistryArc {
    /// Takes a read lock on the underlying [`ClassRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, ClassRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`ClassRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, ClassRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Freezes the current state of the registry.
    pub fn snapshot(&self) -> Arc<ClassRegistry> {
        Arc::new(self.read().clone())
    }
}

impl From<ClassRegistry> for ClassRegistryArc {
    #[inline]
    fn from(registry: ClassRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }
}

impl fmt::Debug for ClassRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read().fmt(f)
    }
}

// -----------------------------------------------------------------------------
// Tests
