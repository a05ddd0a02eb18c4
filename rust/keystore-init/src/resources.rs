//! Bundles the keystore init container with the volumes it mounts.
use snafu::{ResultExt, Snafu};
use stackable_operator::{
    builder::{self, pod::PodBuilder},
    k8s_openapi::api::core::v1::{Container, Volume},
};

use crate::{
    init_container::{self, build_init_container, InitContainerParameters, INIT_CONTAINER_NAME},
    volume::{data_volume, KeystoreVolume, SecretVolume},
};

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Snafu, Debug)]
pub enum Error {
    #[snafu(display("failed to build the keystore init container"))]
    BuildInitContainer { source: init_container::Error },

    #[snafu(display("failed to add volume {volume_name:?} to the Pod"))]
    AddVolume {
        source: builder::pod::Error,
        volume_name: String,
    },
}

/// The keystore init container together with the volumes backing its mounts.
#[derive(Clone, Debug, PartialEq)]
pub struct KeystoreResources {
    pub init_container: Container,
    pub volumes: Vec<Volume>,
}

impl KeystoreResources {
    /// The data volume is only included if `parameters` name a data volume path, otherwise the
    /// caller is expected to provide it.
    pub fn new(
        secure_settings: &SecretVolume,
        volume_name_prefix: &str,
        parameters: &InitContainerParameters,
    ) -> Result<Self> {
        let init_container =
            build_init_container(secure_settings, volume_name_prefix, parameters)
                .context(BuildInitContainerSnafu)?;

        let mut volumes = vec![secure_settings.volume()];
        if !parameters.data_volume_path.is_empty() {
            volumes.push(data_volume(volume_name_prefix, &parameters.data_volume_path).volume());
        }

        Ok(KeystoreResources {
            init_container,
            volumes,
        })
    }

    pub fn add_to_pod(&self, pod_builder: &mut PodBuilder) -> Result<()> {
        pod_builder.add_init_container(self.init_container.clone());
        for volume in &self.volumes {
            pod_builder
                .add_volume(volume.clone())
                .with_context(|_| AddVolumeSnafu {
                    volume_name: volume.name.clone(),
                })?;
        }

        tracing::debug!(
            init_container = INIT_CONTAINER_NAME,
            volumes = self.volumes.len(),
            "added keystore resources to pod"
        );

        Ok(())
    }
}
