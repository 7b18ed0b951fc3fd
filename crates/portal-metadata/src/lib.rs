#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
mod error;
mod provider;
mod record;
mod response;
mod service;

pub use crate::client::MetadataClient;
pub use crate::config::{DEFAULT_TIMEOUT, MetadataClientConfig};
pub use crate::error::{Error, Result};
pub use crate::provider::MetadataProvider;
pub use crate::record::MediaRecord;
pub use crate::response::RegisterResponse;
pub use crate::service::{MetadataService, TRACING_TARGET};
