//! Generated Secret construction and publication.

use super::ReconcilerError;
use crate::constants::FIELD_MANAGER;
use crate::crd::ParameterStore;
use crate::resolver::DesiredSecretPayload;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::PostParams;
use kube::{Api, Resource};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Label marking Secrets owned by this controller; the Secret watch is filtered on it
pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";

/// Build the Secret a `ParameterStore` should produce
///
/// The Secret shares the resource's name and namespace, carries `app=<name>`,
/// and is owned by the resource so it is garbage collected with it.
#[allow(
    clippy::missing_errors_doc,
    reason = "Fails only when the resource has no name, namespace or uid"
)]
pub fn build_secret(
    cr: &ParameterStore,
    payload: DesiredSecretPayload,
) -> Result<Secret, ReconcilerError> {
    let name = cr
        .metadata
        .name
        .clone()
        .ok_or(ReconcilerError::MissingObjectKey(".metadata.name"))?;
    let namespace = cr
        .metadata
        .namespace
        .clone()
        .ok_or(ReconcilerError::MissingObjectKey(".metadata.namespace"))?;
    let owner = cr
        .controller_owner_ref(&())
        .ok_or(ReconcilerError::MissingObjectKey(".metadata.uid"))?;

    let labels = BTreeMap::from([
        ("app".to_string(), name.clone()),
        (MANAGED_BY_LABEL.to_string(), FIELD_MANAGER.to_string()),
    ]);

    Ok(Secret {
        metadata: ObjectMeta {
            name: Some(name),
            namespace: Some(namespace),
            labels: Some(labels),
            annotations: Some(payload.annotations),
            owner_references: Some(vec![owner]),
            ..Default::default()
        },
        string_data: Some(payload.data),
        ..Default::default()
    })
}

/// Create the Secret, or replace the existing one in full
///
/// Returns the action taken, used as the `action` metric label.
pub(super) async fn apply_secret(
    api: &Api<Secret>,
    mut desired: Secret,
) -> Result<&'static str, kube::Error> {
    let name = desired.metadata.name.clone().unwrap_or_default();

    match api.get_opt(&name).await? {
        None => {
            info!("Creating Secret {}", name);
            api.create(&PostParams::default(), &desired).await?;
            Ok("create")
        }
        Some(current) => {
            debug!("Replacing Secret {}", name);
            desired.metadata.resource_version = current.metadata.resource_version;
            api.replace(&name, &PostParams::default(), &desired).await?;
            Ok("update")
        }
    }
}
