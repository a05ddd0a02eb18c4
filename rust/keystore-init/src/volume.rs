//! Volumes mounted into the keystore init container.
use serde::{Deserialize, Serialize};
use stackable_operator::{
    builder::pod::volume::VolumeBuilder,
    k8s_openapi::api::core::v1::{KeyToPath, SecretVolumeSource, Volume, VolumeMount},
};

pub const SECURE_SETTINGS_VOLUME_NAME: &str = "elastic-internal-secure-settings";
pub const SECURE_SETTINGS_VOLUME_MOUNT_PATH: &str = "/mnt/elastic-internal/secure-settings";

/// Something that can be added to a Pod as a volume and mounted into a container.
pub trait KeystoreVolume {
    fn volume_mount(&self) -> VolumeMount;
    fn volume(&self) -> Volume;
}

/// A volume projecting the keys of a Kubernetes Secret as individual files.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretVolume {
    pub name: String,
    pub secret_name: String,
    pub mount_path: String,
    /// Restricts the projected keys. All keys are projected if this is empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<KeyToPath>,
}

impl SecretVolume {
    pub fn new(
        name: impl Into<String>,
        secret_name: impl Into<String>,
        mount_path: impl Into<String>,
    ) -> Self {
        SecretVolume {
            name: name.into(),
            secret_name: secret_name.into(),
            mount_path: mount_path.into(),
            items: Vec::new(),
        }
    }

    /// The secure settings volume at its conventional name and mount path.
    pub fn secure_settings(secret_name: impl Into<String>) -> Self {
        Self::new(
            SECURE_SETTINGS_VOLUME_NAME,
            secret_name,
            SECURE_SETTINGS_VOLUME_MOUNT_PATH,
        )
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = KeyToPath>) -> Self {
        self.items.extend(items);
        self
    }
}

impl KeystoreVolume for SecretVolume {
    fn volume_mount(&self) -> VolumeMount {
        VolumeMount {
            name: self.name.clone(),
            mount_path: self.mount_path.clone(),
            read_only: Some(true),
            ..VolumeMount::default()
        }
    }

    fn volume(&self) -> Volume {
        VolumeBuilder::new(&self.name)
            .secret(SecretVolumeSource {
                secret_name: Some(self.secret_name.clone()),
                items: (!self.items.is_empty()).then(|| self.items.clone()),
                ..SecretVolumeSource::default()
            })
            .build()
    }
}

/// A scratch volume living as long as the Pod.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyDirVolume {
    pub name: String,
    pub mount_path: String,
}

impl KeystoreVolume for EmptyDirVolume {
    fn volume_mount(&self) -> VolumeMount {
        VolumeMount {
            name: self.name.clone(),
            mount_path: self.mount_path.clone(),
            read_only: Some(false),
            ..VolumeMount::default()
        }
    }

    fn volume(&self) -> Volume {
        VolumeBuilder::new(&self.name)
            .with_empty_dir(None::<String>, None)
            .build()
    }
}

/// The volume the keystore is written to, shared with the product container.
pub fn data_volume(volume_name_prefix: &str, data_volume_path: &str) -> EmptyDirVolume {
    EmptyDirVolume {
        name: format!("{volume_name_prefix}-keystore"),
        mount_path: data_volume_path.to_string(),
    }
}
