//! Azure connector and container addressing.
//!
//! The portal addresses its container with two values from the session
//! configuration: the container base URL and a shared-access signature
//! token. [`ContainerAddress`] carries both and resolves display URLs;
//! [`AzureContainer`] turns an address into a connected
//! [`ContainerClient`] via [`object_store::azure::MicrosoftAzureBuilder`].

use derive_more::Deref;
use object_store::azure::MicrosoftAzureBuilder;
use url::Url;

use crate::client::ContainerClient;
use crate::error::{Error, Result};

/// Location of the portal's container plus its access credential.
#[derive(Clone, Debug)]
pub struct ContainerAddress {
    /// Container base URL, e.g. `https://account.blob.core.windows.net/media`.
    base_url: Url,
    /// Shared-access signature token, without a leading `?`.
    sas_token: String,
}

impl ContainerAddress {
    /// Build an address from a container base URL and a SAS token.
    ///
    /// A leading `?` on the token is stripped so both raw query strings and
    /// copy-pasted portal tokens are accepted.
    pub fn new(base_url: Url, sas_token: impl Into<String>) -> Self {
        let sas_token = sas_token.into().trim_start_matches('?').to_string();
        Self {
            base_url,
            sas_token,
        }
    }

    /// The container base URL as a string, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Resolve the display/download URL for the object stored at `key`:
    /// `{base}/{key}?{token}`.
    pub fn content_url(&self, key: &str) -> String {
        format!("{}/{}?{}", self.base_url(), key, self.sas_token)
    }

    /// The SAS token split into query pairs for the store builder.
    pub(crate) fn sas_pairs(&self) -> Vec<(String, String)> {
        self.sas_token
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let mut parts = pair.splitn(2, '=');
                Some((
                    parts.next()?.to_string(),
                    parts.next().unwrap_or("").to_string(),
                ))
            })
            .collect()
    }
}

/// Azure Blob Storage-backed container client.
#[derive(Clone, Debug, Deref)]
pub struct AzureContainer(ContainerClient);

impl AzureContainer {
    /// Unique identifier for this connector.
    pub const ID: &str = "azure";

    /// Connect to the container named by `address`.
    ///
    /// No network traffic is issued here; credential problems surface on
    /// the first operation, exactly as in the browser client this portal
    /// replaces.
    pub fn connect(address: &ContainerAddress) -> Result<Self> {
        let mut builder = MicrosoftAzureBuilder::new().with_url(address.base_url());

        let pairs = address.sas_pairs();
        if !pairs.is_empty() {
            builder = builder.with_sas_authorization(pairs);
        }

        let store = builder
            .build()
            .map_err(|e| Error::Connection(format!("{}: {e}", Self::ID)))?;

        Ok(Self(ContainerClient::new(store)))
    }

    /// The wrapped container client.
    pub fn client(&self) -> &ContainerClient {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> ContainerAddress {
        ContainerAddress::new(
            Url::parse("https://account.blob.core.windows.net/media").unwrap(),
            "sv=2024-01-01&sig=abc123",
        )
    }

    #[test]
    fn content_url_joins_base_key_and_token() {
        assert_eq!(
            address().content_url("a_b.png"),
            "https://account.blob.core.windows.net/media/a_b.png?sv=2024-01-01&sig=abc123",
        );
    }

    #[test]
    fn trailing_slash_and_leading_question_mark_are_normalized() {
        let addr = ContainerAddress::new(
            Url::parse("https://account.blob.core.windows.net/media/").unwrap(),
            "?sv=2024-01-01&sig=abc123",
        );
        assert_eq!(
            addr.content_url("c.mp4"),
            "https://account.blob.core.windows.net/media/c.mp4?sv=2024-01-01&sig=abc123",
        );
    }

    #[test]
    fn sas_pairs_split_on_first_equals_only() {
        let pairs = address().sas_pairs();
        assert_eq!(
            pairs,
            vec![
                ("sv".to_string(), "2024-01-01".to_string()),
                ("sig".to_string(), "abc123".to_string()),
            ],
        );

        let addr = ContainerAddress::new(
            Url::parse("https://account.blob.core.windows.net/media").unwrap(),
            "sig=a=b",
        );
        assert_eq!(
            addr.sas_pairs(),
            vec![("sig".to_string(), "a=b".to_string())],
        );
    }

    #[test]
    fn connect_builds_a_client_without_network() {
        let container = AzureContainer::connect(&address()).unwrap();
        let _client: &ContainerClient = container.client();
    }

    #[test]
    fn connect_failure_names_the_connector() {
        // Not an Azure endpoint the builder recognises.
        let addr = ContainerAddress::new(
            Url::parse("https://example.com/not-a-container").unwrap(),
            "sig=abc123",
        );
        let err = AzureContainer::connect(&addr).unwrap_err();
        assert!(err.to_string().contains(AzureContainer::ID));
    }
}
