//! The standard Kubernetes API types shipped with `k8s-openapi`.

use k8s_openapi::api::{
    admissionregistration, apps, autoscaling, batch, certificates, coordination, discovery, events,
    networking, node, policy, rbac, scheduling, storage,
};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions;
use k8s_openapi::kube_aggregator::pkg::apis::apiregistration;

use super::{InstallError, Scheme};

pub fn add_to_scheme(scheme: &mut Scheme) -> Result<(), InstallError> {
    scheme.install(&[
        core_v1,
        apps_v1,
        autoscaling_v1_v2,
        batch_v1,
        networking_v1,
        policy_v1,
        rbac_v1,
        storage_v1,
        cluster_v1,
        extension_apis,
    ])
}

fn core_v1(scheme: &mut Scheme) -> Result<(), InstallError> {
    use k8s_openapi::api::core::v1::*;

    scheme.add_known_type::<ConfigMap>()?;
    scheme.add_known_type::<Endpoints>()?;
    scheme.add_known_type::<Event>()?;
    scheme.add_known_type::<LimitRange>()?;
    scheme.add_known_type::<Namespace>()?;
    scheme.add_known_type::<Node>()?;
    scheme.add_known_type::<PersistentVolume>()?;
    scheme.add_known_type::<PersistentVolumeClaim>()?;
    scheme.add_known_type::<Pod>()?;
    scheme.add_known_type::<PodTemplate>()?;
    scheme.add_known_type::<ReplicationController>()?;
    scheme.add_known_type::<ResourceQuota>()?;
    scheme.add_known_type::<Secret>()?;
    scheme.add_known_type::<Service>()?;
    scheme.add_known_type::<ServiceAccount>()
}

fn apps_v1(scheme: &mut Scheme) -> Result<(), InstallError> {
    use apps::v1::*;

    scheme.add_known_type::<ControllerRevision>()?;
    scheme.add_known_type::<DaemonSet>()?;
    scheme.add_known_type::<Deployment>()?;
    scheme.add_known_type::<ReplicaSet>()?;
    scheme.add_known_type::<StatefulSet>()
}

// Both served versions are registered.
fn autoscaling_v1_v2(scheme: &mut Scheme) -> Result<(), InstallError> {
    scheme.add_known_type::<autoscaling::v1::HorizontalPodAutoscaler>()?;
    scheme.add_known_type::<autoscaling::v2::HorizontalPodAutoscaler>()
}

fn batch_v1(scheme: &mut Scheme) -> Result<(), InstallError> {
    scheme.add_known_type::<batch::v1::CronJob>()?;
    scheme.add_known_type::<batch::v1::Job>()
}

fn networking_v1(scheme: &mut Scheme) -> Result<(), InstallError> {
    scheme.add_known_type::<networking::v1::Ingress>()?;
    scheme.add_known_type::<networking::v1::IngressClass>()?;
    scheme.add_known_type::<networking::v1::NetworkPolicy>()?;
    scheme.add_known_type::<discovery::v1::EndpointSlice>()
}

fn policy_v1(scheme: &mut Scheme) -> Result<(), InstallError> {
    scheme.add_known_type::<policy::v1::PodDisruptionBudget>()
}

fn rbac_v1(scheme: &mut Scheme) -> Result<(), InstallError> {
    use rbac::v1::*;

    scheme.add_known_type::<ClusterRole>()?;
    scheme.add_known_type::<ClusterRoleBinding>()?;
    scheme.add_known_type::<Role>()?;
    scheme.add_known_type::<RoleBinding>()
}

fn storage_v1(scheme: &mut Scheme) -> Result<(), InstallError> {
    use storage::v1::*;

    scheme.add_known_type::<CSIDriver>()?;
    scheme.add_known_type::<CSINode>()?;
    scheme.add_known_type::<StorageClass>()?;
    scheme.add_known_type::<VolumeAttachment>()
}

fn cluster_v1(scheme: &mut Scheme) -> Result<(), InstallError> {
    scheme.add_known_type::<certificates::v1::CertificateSigningRequest>()?;
    scheme.add_known_type::<coordination::v1::Lease>()?;
    scheme.add_known_type::<events::v1::Event>()?;
    scheme.add_known_type::<node::v1::RuntimeClass>()?;
    scheme.add_known_type::<scheduling::v1::PriorityClass>()
}

fn extension_apis(scheme: &mut Scheme) -> Result<(), InstallError> {
    scheme.add_known_type::<admissionregistration::v1::MutatingWebhookConfiguration>()?;
    scheme.add_known_type::<admissionregistration::v1::ValidatingWebhookConfiguration>()?;
    scheme.add_known_type::<apiextensions::v1::CustomResourceDefinition>()?;
    scheme.add_known_type::<apiregistration::v1::APIService>()
}
