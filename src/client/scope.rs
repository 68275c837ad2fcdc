use kube::core::{ClusterResourceScope, NamespaceResourceScope};
use kube::{Api, Resource};

/// Helper trait for getting [`kube::Api`] instances that list a resource within its scope.
///
/// Not intended to be implemented manually, it is blanket-implemented for all types that implement [`Resource`]
/// for either the [namespace](`NamespaceResourceScope`) or [cluster](`ClusterResourceScope`) scopes.
pub trait ScopedApi: Resource + Sized {
    /// Whether objects of `Self` live inside a namespace.
    const NAMESPACED: bool;
    /// Get a [`kube::Api`] for `Self`, restricted to `namespace` when `Self` is namespaced.
    ///
    /// `None` lists across all namespaces. Cluster-scoped resources ignore the namespace.
    fn scoped_api(client: kube::Client, namespace: Option<&str>) -> Api<Self>
    where
        Self::DynamicType: Default;
}

impl<K> ScopedApi for K
where
    K: Resource,
    (K, K::Scope): ScopedApiImpl<Resource = K>,
{
    const NAMESPACED: bool = <(K, K::Scope) as ScopedApiImpl>::NAMESPACED;
    fn scoped_api(client: kube::Client, namespace: Option<&str>) -> Api<Self>
    where
        Self::DynamicType: Default,
    {
        <(K, K::Scope) as ScopedApiImpl>::scoped_api(client, namespace)
    }
}

#[doc(hidden)]
// Workaround for https://github.com/rust-lang/rust/issues/20400
pub trait ScopedApiImpl {
    type Resource: Resource;
    const NAMESPACED: bool;
    fn scoped_api(client: kube::Client, namespace: Option<&str>) -> Api<Self::Resource>
    where
        <Self::Resource as Resource>::DynamicType: Default;
}

impl<K> ScopedApiImpl for (K, NamespaceResourceScope)
where
    K: Resource<Scope = NamespaceResourceScope>,
{
    type Resource = K;
    const NAMESPACED: bool = true;
    fn scoped_api(client: kube::Client, namespace: Option<&str>) -> Api<K>
    where
        <Self::Resource as Resource>::DynamicType: Default,
    {
        match namespace {
            Some(ns) => Api::namespaced(client, ns),
            None => Api::all(client),
        }
    }
}

impl<K> ScopedApiImpl for (K, ClusterResourceScope)
where
    K: Resource<Scope = ClusterResourceScope>,
{
    type Resource = K;
    const NAMESPACED: bool = false;
    fn scoped_api(client: kube::Client, _namespace: Option<&str>) -> Api<K>
    where
        <Self::Resource as Resource>::DynamicType: Default,
    {
        Api::all(client)
    }
}
