//! Read-only access to the API server.
//!
//! [`Client::list`] is the single list operation. What gets listed, and in
//! which shape the objects come back, is decided by the [`ListTarget`]:
//! [`Typed`] for compiled-in resource types, [`Unstructured`] for any kind
//! registered in the [`Scheme`](crate::scheme::Scheme).

use std::fmt::Debug;
use std::marker::PhantomData;

use kube::api::{ApiResource, DynamicObject, ListParams};
use kube::{Api, Resource};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};
use crate::scheme::{TypeDescriptor, TypeKey};

mod scope;

pub use scope::ScopedApi;

/// What to list and how to decode it.
pub trait ListTarget {
    type Object: Clone + DeserializeOwned + Debug;

    fn api(&self, client: kube::Client, namespace: Option<&str>) -> Api<Self::Object>;

    /// Human readable name of the listed kind, used in logs and errors.
    fn kind(&self) -> String;
}

/// Lists `K`, decoding every item into `K`.
pub struct Typed<K>(PhantomData<fn() -> K>);

impl<K> Typed<K> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<K> Default for Typed<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ListTarget for Typed<K>
where
    K: ScopedApi + Resource<DynamicType = ()> + Clone + DeserializeOwned + Debug,
{
    type Object = K;

    fn api(&self, client: kube::Client, namespace: Option<&str>) -> Api<K> {
        K::scoped_api(client, namespace)
    }

    fn kind(&self) -> String {
        TypeKey::of::<K>().list_key().to_string()
    }
}

/// Lists a kind known only by key, decoding items into [`DynamicObject`]s.
pub struct Unstructured {
    resource: ApiResource,
    namespaced: bool,
}

impl Unstructured {
    /// `key` may name either the item kind or its `<Kind>List`, the
    /// request is the same.
    pub fn new(key: &TypeKey, descriptor: &TypeDescriptor) -> Self {
        let item = key.item_key().unwrap_or_else(|| key.clone());
        Self {
            resource: ApiResource {
                api_version: item.api_version(),
                group: item.group,
                version: item.version,
                kind: item.kind,
                plural: descriptor.plural().to_string(),
            },
            namespaced: descriptor.namespaced(),
        }
    }
}

impl ListTarget for Unstructured {
    type Object = DynamicObject;

    fn api(&self, client: kube::Client, namespace: Option<&str>) -> Api<DynamicObject> {
        match namespace {
            Some(ns) if self.namespaced => Api::namespaced_with(client, ns, &self.resource),
            _ => Api::all_with(client, &self.resource),
        }
    }

    fn kind(&self) -> String {
        format!(
            "{}/{}, Kind={}List",
            self.resource.group, self.resource.version, self.resource.kind
        )
    }
}

/// API server client, optionally pinned to one namespace.
#[derive(Clone)]
pub struct Client {
    inner: kube::Client,
    namespace: Option<String>,
}

impl Client {
    pub fn new(inner: kube::Client, namespace: Option<String>) -> Self {
        Self { inner, namespace }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub(crate) fn kube_client(&self) -> kube::Client {
        self.inner.clone()
    }

    /// Lists every object of `target` and returns how many there are.
    pub async fn list<T: ListTarget>(&self, target: &T) -> Result<usize> {
        let api = target.api(self.inner.clone(), self.namespace());
        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|source| Error::Client {
                kind: target.kind(),
                source,
            })?;

        debug!(kind = %target.kind(), items = list.items.len(), "listed");
        Ok(list.items.len())
    }
}
