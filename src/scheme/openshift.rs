//! OpenShift API types.
//!
//! Only the fields needed to recognise the objects are modelled, everything
//! else is left to the API server.

use std::collections::BTreeMap;

use kube::CustomResource;
use serde::{Deserialize, Serialize};

use super::{InstallError, Scheme};

/// Exposes a service at a host name.
#[derive(CustomResource, Clone, Default, Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
#[kube(schema = "disabled")]
#[kube(namespaced)]
#[kube(
    kind = "Route",
    group = "route.openshift.io",
    version = "v1",
    status = "RouteStatus"
)]
pub struct RouteSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub to: RouteTargetReference,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_backends: Vec<RouteTargetReference>,
}

#[derive(Clone, Default, Deserialize, Serialize, Debug, PartialEq)]
pub struct RouteTargetReference {
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

#[derive(Clone, Default, Deserialize, Serialize, Debug)]
pub struct RouteStatus {
    #[serde(default)]
    pub ingress: Vec<RouteIngress>,
}

#[derive(Clone, Default, Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RouteIngress {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub router_name: Option<String>,
}

/// A namespace with additional annotations, cluster scoped.
#[derive(CustomResource, Clone, Default, Deserialize, Serialize, Debug)]
#[kube(schema = "disabled")]
#[kube(kind = "Project", group = "project.openshift.io", version = "v1")]
pub struct ProjectSpec {
    #[serde(default)]
    pub finalizers: Vec<String>,
}

#[derive(CustomResource, Clone, Default, Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
#[kube(schema = "disabled")]
#[kube(namespaced)]
#[kube(kind = "ImageStream", group = "image.openshift.io", version = "v1")]
pub struct ImageStreamSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_image_repository: Option<String>,
    #[serde(default)]
    pub tags: Vec<TagReference>,
}

#[derive(Clone, Default, Deserialize, Serialize, Debug)]
pub struct TagReference {
    pub name: String,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

#[derive(CustomResource, Clone, Default, Deserialize, Serialize, Debug)]
#[kube(schema = "disabled")]
#[kube(namespaced)]
#[kube(kind = "DeploymentConfig", group = "apps.openshift.io", version = "v1")]
pub struct DeploymentConfigSpec {
    #[serde(default)]
    pub replicas: i32,
    #[serde(default)]
    pub selector: BTreeMap<String, String>,
    #[serde(default)]
    pub paused: bool,
}

#[derive(CustomResource, Clone, Default, Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
#[kube(schema = "disabled")]
#[kube(namespaced)]
#[kube(kind = "BuildConfig", group = "build.openshift.io", version = "v1")]
pub struct BuildConfigSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,
}

#[derive(CustomResource, Clone, Default, Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
#[kube(schema = "disabled")]
#[kube(kind = "ClusterVersion", group = "config.openshift.io", version = "v1")]
pub struct ClusterVersionSpec {
    pub cluster_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

pub fn add_to_scheme(scheme: &mut Scheme) -> Result<(), InstallError> {
    scheme.add_known_type::<Route>()?;
    scheme.add_known_type::<Project>()?;
    scheme.add_known_type::<ImageStream>()?;
    scheme.add_known_type::<DeploymentConfig>()?;
    scheme.add_known_type::<BuildConfig>()?;
    scheme.add_known_type::<ClusterVersion>()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::scheme::{builtin, TypeKey};

    #[test]
    fn installs_alongside_builtin_types() {
        let mut scheme = Scheme::new();
        scheme
            .install(&[builtin::add_to_scheme, add_to_scheme])
            .unwrap();

        let routes = scheme
            .resolve(&TypeKey::new("route.openshift.io", "v1", "RouteList"))
            .unwrap();
        assert_eq!(routes.plural(), "routes");
        assert!(routes.namespaced());

        assert!(scheme
            .descriptor(&TypeKey::new("apps.openshift.io", "v1", "DeploymentConfig"))
            .is_some());
    }

    #[test]
    fn projects_and_cluster_versions_are_cluster_scoped() {
        let mut scheme = Scheme::new();
        add_to_scheme(&mut scheme).unwrap();

        for key in [TypeKey::of::<Project>(), TypeKey::of::<ClusterVersion>()] {
            assert!(!scheme.resolve(&key).unwrap().namespaced(), "{key}");
        }
    }

    #[test]
    fn route_decodes_from_api_object() {
        let route: Route = serde_json::from_value(json!({
            "apiVersion": "route.openshift.io/v1",
            "kind": "Route",
            "metadata": { "name": "console", "namespace": "openshift-console" },
            "spec": {
                "host": "console.apps.example.com",
                "to": { "kind": "Service", "name": "console", "weight": 100 },
            },
            "status": { "ingress": [{ "host": "console.apps.example.com", "routerName": "default" }] },
        }))
        .unwrap();

        assert_eq!(route.spec.host.as_deref(), Some("console.apps.example.com"));
        assert_eq!(
            route.spec.to,
            RouteTargetReference {
                kind: "Service".into(),
                name: "console".into(),
                weight: Some(100),
            }
        );
        let status = route.status.unwrap();
        assert_eq!(status.ingress[0].router_name.as_deref(), Some("default"));
    }
}
