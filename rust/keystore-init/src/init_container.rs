//! Assembles the init container that populates the keystore before the product starts.
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};
use stackable_operator::{
    builder::{self, pod::container::ContainerBuilder},
    k8s_openapi::api::core::v1::{Container, ResourceRequirements, SecurityContext},
};

use crate::{
    script,
    volume::{data_volume, KeystoreVolume, SecretVolume},
};

pub const INIT_CONTAINER_NAME: &str = "elastic-internal-init-keystore";

const IMAGE_PULL_POLICY: &str = "IfNotPresent";

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Snafu, Debug)]
pub enum Error {
    #[snafu(display("failed to render the keystore init script"))]
    RenderScript { source: script::Error },

    #[snafu(display("failed to add needed volumeMount"))]
    AddVolumeMount {
        source: builder::pod::container::Error,
    },
}

/// Everything needed to render the keystore script for a specific product.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitContainerParameters {
    /// Directory the secure settings Secret is mounted at, one file per setting.
    pub secure_settings_mount_path: String,

    /// Where the keystore is written to. Leave empty if the caller mounts the data volume itself.
    #[serde(default)]
    pub data_volume_path: String,

    pub keystore_create_command: String,

    /// Run once per secure setting with `$filename` and `$key` set.
    pub keystore_add_command: String,

    #[serde(default)]
    pub resources: ResourceRequirements,
}

/// Builds the keystore init container.
///
/// The image is not set, it is inherited from the product defaults of the Pod template.
pub fn build_init_container(
    secure_settings: &SecretVolume,
    volume_name_prefix: &str,
    parameters: &InitContainerParameters,
) -> Result<Container> {
    let script = script::render_script(parameters).context(RenderScriptSnafu)?;

    let mut volume_mounts = vec![secure_settings.volume_mount()];
    // The caller might already be taking care of the data volume and its mount
    if !parameters.data_volume_path.is_empty() {
        volume_mounts
            .push(data_volume(volume_name_prefix, &parameters.data_volume_path).volume_mount());
    }
    let volume_mount_count = volume_mounts.len();

    let container = ContainerBuilder::new(INIT_CONTAINER_NAME)
        .expect("invalid hard-coded container name")
        .image_pull_policy(IMAGE_PULL_POLICY)
        .security_context(SecurityContext {
            privileged: Some(false),
            ..SecurityContext::default()
        })
        .command(vec![
            "/usr/bin/env".to_string(),
            "bash".to_string(),
            "-c".to_string(),
            script,
        ])
        .add_volume_mounts(volume_mounts)
        .context(AddVolumeMountSnafu)?
        .resources(parameters.resources.clone())
        .build();

    tracing::debug!(
        container.name = INIT_CONTAINER_NAME,
        volume_mounts = volume_mount_count,
        "built keystore init container"
    );

    Ok(container)
}
