//! Main Gofile client.

use crate::account::Account;
use crate::accounts::AccountsClient;
use crate::config::ClientConfig;
use crate::content::{Content, UploadedFile};
use crate::contents::ContentsClient;
use crate::error::{GofileError, Result, StatusError};
use crate::types::{UploadOptions, UploadSource};
use crate::upload::UploadClient;
use reqwest::Client;
use tracing::info;

/// Client for the Gofile API.
///
/// The token is fixed at construction. Without one the client works in guest
/// mode, where uploads succeed but most content operations are refused.
///
/// # Example
///
/// ```ignore
/// use gofile_client::{ClientConfig, GofileClient, UploadOptions, UploadSource};
///
/// let client = GofileClient::with_new_guest_account(ClientConfig::default()).await?;
///
/// let uploaded = client
///     .upload_file(UploadSource::from_bytes("ok", "test.txt"), UploadOptions::new())
///     .await?;
/// println!("Uploaded to {}", uploaded.download_page);
///
/// client.contents().delete_content(&uploaded.file_id).await?;
/// ```
#[derive(Clone)]
pub struct GofileClient {
    http: Client,
    config: ClientConfig,
}

impl GofileClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let config = config.normalized()?;

        let http = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(format!("gofile-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GofileError::Request)?;

        Ok(Self { http, config })
    }

    /// A guest client against the public API.
    pub fn guest() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Create a client authenticated as `account`.
    pub fn from_account(config: ClientConfig, account: &Account) -> Result<Self> {
        if account.token.is_empty() {
            return Err(StatusError::TokenMissing.into());
        }
        Self::new(config.with_token(account.token.clone()))
    }

    /// Register a fresh guest account and use its token.
    pub async fn with_new_guest_account(config: ClientConfig) -> Result<Self> {
        let registrar = Self::new(ClientConfig {
            token: None,
            ..config.clone()
        })?;
        let created = registrar.accounts().register(None).await?;

        info!(account_id = %created.id, "Using new guest account");
        Self::new(config.with_token(created.token))
    }

    /// The bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        self.config.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.config.token.is_some()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The underlying HTTP client, e.g. for [`UploadSource::from_url`].
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn accounts(&self) -> AccountsClient<'_> {
        AccountsClient::new(&self.http, &self.config)
    }

    pub fn contents(&self) -> ContentsClient<'_> {
        ContentsClient::new(&self.http, &self.config)
    }

    pub fn uploads(&self) -> UploadClient<'_> {
        UploadClient::new(&self.http, &self.config)
    }

    /// Upload one file, choosing a server unless one is pinned.
    pub async fn upload_file(
        &self,
        source: UploadSource,
        options: UploadOptions,
    ) -> Result<UploadedFile> {
        self.uploads().upload_file(source, options).await
    }

    /// Fetch a file or folder.
    pub async fn get_content(&self, content_id: &str) -> Result<Content> {
        self.contents().get_content(content_id).await
    }

    /// Fetch the account owning the token.
    pub async fn get_account(&self) -> Result<Account> {
        self.accounts().get().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_client() {
        let client = GofileClient::guest().unwrap();
        assert!(client.token().is_none());
        assert!(!client.is_authenticated());
        assert_eq!(client.config().api_url, "https://api.gofile.io");
    }

    #[test]
    fn test_from_account_requires_token() {
        let account = Account::default();
        let err = GofileClient::from_account(ClientConfig::default(), &account).err();
        assert!(matches!(
            err,
            Some(GofileError::Status(StatusError::TokenMissing))
        ));

        let account = Account {
            token: "tok".into(),
            ..Account::default()
        };
        let client = GofileClient::from_account(ClientConfig::default(), &account).unwrap();
        assert_eq!(client.token(), Some("tok"));
    }
}
