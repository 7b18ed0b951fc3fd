#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod client;
/// Azure connector and container addressing.
pub mod container;
/// Minimal error type for container operations.
pub mod error;

pub use crate::client::{ContainerClient, PutOutput};
pub use crate::container::{AzureContainer, ContainerAddress};
pub use crate::error::Error;

#[doc(hidden)]
pub mod prelude;
