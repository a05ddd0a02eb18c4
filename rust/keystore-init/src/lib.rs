//! Builds the init container that creates a product keystore and fills it with every setting
//! found in a mounted secure settings Secret, before the product container starts.
pub mod init_container;
pub mod product;
pub mod resources;
pub mod script;
pub mod volume;

pub use init_container::{build_init_container, InitContainerParameters, INIT_CONTAINER_NAME};
pub use product::KeystoreProduct;
pub use resources::KeystoreResources;
pub use volume::{data_volume, EmptyDirVolume, KeystoreVolume, SecretVolume};
