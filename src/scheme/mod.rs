//! Registry of the resource types this program knows how to (de)serialize.
//!
//! A [`Scheme`] binds a [`TypeKey`] (group, version, kind) to the Rust type
//! implementing it. Types are installed through [`AddToScheme`] functions,
//! one per API group bundle, see [`builtin`] and [`openshift`].

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use kube::core::ObjectList;
use kube::Resource;
use serde::Serialize;
use thiserror::Error;

use crate::client::ScopedApi;

pub mod builtin;
pub mod openshift;

/// Snapshot of every registered key and the type behind it.
pub type Registry = HashMap<TypeKey, TypeDescriptor>;

/// Installs a bundle of types into a scheme.
pub type AddToScheme = fn(&mut Scheme) -> Result<(), InstallError>;

const LIST_SUFFIX: &str = "List";

/// Identifies a resource type by group, version and kind.
///
/// Ordering compares `group`, then `version`, then `kind`, each as a
/// case-sensitive byte-wise string comparison. The core group is `""`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TypeKey {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl TypeKey {
    pub fn new(group: impl Into<String>, version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Key of a statically typed resource.
    pub fn of<K: Resource<DynamicType = ()>>() -> Self {
        Self::new(K::group(&()), K::version(&()), K::kind(&()))
    }

    /// Key of the list type holding objects of this kind.
    pub fn list_key(&self) -> Self {
        Self::new(&self.group, &self.version, format!("{}{LIST_SUFFIX}", self.kind))
    }

    /// Key of the items of a list kind, `None` if this is not a list kind.
    pub fn item_key(&self) -> Option<Self> {
        let kind = self.kind.strip_suffix(LIST_SUFFIX).filter(|k| !k.is_empty())?;
        Some(Self::new(&self.group, &self.version, kind))
    }

    /// `apiVersion` as it appears on the wire: `v1` or `apps/v1`.
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}, Kind={}", self.group, self.version, self.kind)
    }
}

/// The Rust type registered for a [`TypeKey`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    plural: String,
    namespaced: bool,
}

impl TypeDescriptor {
    pub fn of<K>() -> Self
    where
        K: ScopedApi + Resource<DynamicType = ()> + 'static,
    {
        Self {
            type_id: TypeId::of::<K>(),
            type_name: type_name::<K>(),
            plural: K::plural(&()).into_owned(),
            namespaced: K::NAMESPACED,
        }
    }

    /// Descriptor of the list wrapping `K`. Lists share the plural and
    /// scope of their items.
    pub fn of_list<K>() -> Self
    where
        K: ScopedApi + Resource<DynamicType = ()> + Clone + 'static,
    {
        Self {
            type_id: TypeId::of::<ObjectList<K>>(),
            type_name: type_name::<ObjectList<K>>(),
            ..Self::of::<K>()
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn plural(&self) -> &str {
        &self.plural
    }

    pub fn namespaced(&self) -> bool {
        self.namespaced
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("{key} is already registered as {existing}, refusing to register {requested}")]
    Conflict {
        key: TypeKey,
        existing: &'static str,
        requested: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum NotRegistered {
    #[error("no kind is registered for type {0}")]
    Type(&'static str),

    #[error("{0} is not registered")]
    Key(TypeKey),
}

#[derive(Debug, Default)]
pub struct Scheme {
    types: Registry,
    kinds: HashMap<TypeId, Vec<TypeKey>>,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every installer in order, stopping at the first failure.
    pub fn install(&mut self, installers: &[AddToScheme]) -> Result<(), InstallError> {
        installers.iter().try_for_each(|add| add(self))
    }

    /// Registers `K` and its list type under `K`'s key and `<Kind>List`.
    ///
    /// Registering the same type again is a no-op.
    pub fn add_known_type<K>(&mut self) -> Result<(), InstallError>
    where
        K: ScopedApi + Resource<DynamicType = ()> + Clone + 'static,
    {
        let key = TypeKey::of::<K>();
        self.add(key.list_key(), TypeDescriptor::of_list::<K>())?;
        self.add(key, TypeDescriptor::of::<K>())
    }

    fn add(&mut self, key: TypeKey, descriptor: TypeDescriptor) -> Result<(), InstallError> {
        if let Some(existing) = self.types.get(&key) {
            if existing.type_id == descriptor.type_id {
                return Ok(());
            }
            return Err(InstallError::Conflict {
                key,
                existing: existing.type_name,
                requested: descriptor.type_name,
            });
        }

        self.kinds
            .entry(descriptor.type_id)
            .or_default()
            .push(key.clone());
        self.types.insert(key, descriptor);
        Ok(())
    }

    /// Point-in-time copy of all registered types.
    pub fn all_known_types(&self) -> Registry {
        self.types.clone()
    }

    pub fn descriptor(&self, key: &TypeKey) -> Option<&TypeDescriptor> {
        self.types.get(key)
    }

    /// Like [`Scheme::descriptor`], failing for unregistered keys.
    pub fn resolve(&self, key: &TypeKey) -> Result<&TypeDescriptor, NotRegistered> {
        self.descriptor(key)
            .ok_or_else(|| NotRegistered::Key(key.clone()))
    }

    /// All keys `T` is registered under, in registration order.
    pub fn object_kinds<T: Any>(&self) -> Result<Vec<TypeKey>, NotRegistered> {
        self.kinds
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or(NotRegistered::Type(type_name::<T>()))
    }
}
