//! Keystore parameters of the products that read their secure settings from a keystore.
use serde::{Deserialize, Serialize};
use stackable_operator::{
    builder::pod::resources::ResourceRequirementsBuilder,
    k8s_openapi::api::core::v1::ResourceRequirements,
};
use strum::{Display, EnumIter, EnumString};

use crate::{init_container::InitContainerParameters, volume::SECURE_SETTINGS_VOLUME_MOUNT_PATH};

#[derive(
    Clone, Copy, Debug, Deserialize, Display, EnumIter, EnumString, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum KeystoreProduct {
    Kibana,
    ApmServer,
}

impl KeystoreProduct {
    pub fn data_volume_path(&self) -> &'static str {
        match self {
            KeystoreProduct::Kibana => "/usr/share/kibana/data",
            KeystoreProduct::ApmServer => "/usr/share/apm-server/data",
        }
    }

    pub fn keystore_create_command(&self) -> &'static str {
        match self {
            KeystoreProduct::Kibana => "/usr/share/kibana/bin/kibana-keystore create",
            // --force overwrites a keystore left behind by a previous run
            KeystoreProduct::ApmServer => "/usr/share/apm-server/apm-server keystore create --force",
        }
    }

    pub fn keystore_add_command(&self) -> &'static str {
        match self {
            KeystoreProduct::Kibana => {
                r#"/usr/share/kibana/bin/kibana-keystore add "$key" --stdin < "$filename""#
            }
            KeystoreProduct::ApmServer => {
                r#"/usr/share/apm-server/apm-server keystore add "$key" --stdin < "$filename""#
            }
        }
    }

    /// Init container parameters with the secure settings mounted at
    /// [`SECURE_SETTINGS_VOLUME_MOUNT_PATH`] and [`default_resources`].
    pub fn parameters(&self) -> InitContainerParameters {
        InitContainerParameters {
            secure_settings_mount_path: SECURE_SETTINGS_VOLUME_MOUNT_PATH.to_string(),
            data_volume_path: self.data_volume_path().to_string(),
            keystore_create_command: self.keystore_create_command().to_string(),
            keystore_add_command: self.keystore_add_command().to_string(),
            resources: default_resources(),
        }
    }
}

pub fn default_resources() -> ResourceRequirements {
    ResourceRequirementsBuilder::new()
        .with_cpu_request("100m")
        .with_cpu_limit("100m")
        .with_memory_request("196Mi")
        .with_memory_limit("196Mi")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        init_container::build_init_container,
        script::render_script,
        volume::{SecretVolume, SECURE_SETTINGS_VOLUME_NAME},
    };
    use rstest::rstest;
    use stackable_operator::k8s_openapi::apimachinery::pkg::api::resource::Quantity;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case("kibana", KeystoreProduct::Kibana)]
    #[case("apm-server", KeystoreProduct::ApmServer)]
    fn test_product_names(#[case] name: &str, #[case] product: KeystoreProduct) {
        assert_eq!(KeystoreProduct::from_str(name).unwrap(), product);
        assert_eq!(product.to_string(), name);
        assert_eq!(
            serde_json::from_value::<KeystoreProduct>(serde_json::json!(name)).unwrap(),
            product
        );
    }

    #[test]
    fn test_default_resources() {
        let resources = default_resources();
        let expected_cpu = Quantity("100m".to_string());
        let expected_memory = Quantity("196Mi".to_string());

        for quantities in [resources.requests.unwrap(), resources.limits.unwrap()] {
            assert_eq!(quantities.get("cpu"), Some(&expected_cpu));
            assert_eq!(quantities.get("memory"), Some(&expected_memory));
        }
    }

    #[test]
    fn test_product_parameters_render() {
        for product in KeystoreProduct::iter() {
            let params = product.parameters();
            let script = render_script(&params).unwrap();

            assert!(script.contains(&format!(
                "for filename in {SECURE_SETTINGS_VOLUME_MOUNT_PATH}/*; do"
            )));
            assert!(script.contains(product.keystore_create_command()));
            assert!(script.contains(product.keystore_add_command()));
        }
    }

    #[test]
    fn test_kibana_init_container() {
        let container = build_init_container(
            &SecretVolume::secure_settings("kibana-secure-settings"),
            "kibana",
            &KeystoreProduct::Kibana.parameters(),
        )
        .unwrap();

        let volume_mounts = container.volume_mounts.unwrap();
        assert_eq!(volume_mounts.len(), 2);
        assert_eq!(volume_mounts[0].name, SECURE_SETTINGS_VOLUME_NAME);
        assert_eq!(volume_mounts[1].mount_path, "/usr/share/kibana/data");
        assert_eq!(container.resources, Some(default_resources()));
    }
}
