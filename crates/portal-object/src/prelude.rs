//! Convenience re-exports.

pub use crate::client::{ContainerClient, PutOutput};
pub use crate::container::{AzureContainer, ContainerAddress};
pub use crate::error::Error;
