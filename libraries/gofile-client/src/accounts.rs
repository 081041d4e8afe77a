//! Account operations for the Gofile API.

use crate::account::{Account, CreatedAccount, UniversalAccount};
use crate::config::ClientConfig;
use crate::envelope::{authorize, execute, execute_empty};
use crate::error::Result;
use crate::types::RegisterRequest;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info};

/// Account client for the Gofile API.
pub struct AccountsClient<'a> {
    http: &'a Client,
    config: &'a ClientConfig,
}

impl<'a> AccountsClient<'a> {
    pub(crate) fn new(http: &'a Client, config: &'a ClientConfig) -> Self {
        Self { http, config }
    }

    fn url(&self, segments: &[&str]) -> Result<String> {
        self.config.endpoint(segments)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        authorize(request, self.config.token.as_deref())
    }

    /// Register a new account. Without an email this creates a guest account.
    ///
    /// Registration never sends the client's token.
    pub async fn register(&self, email: Option<&str>) -> Result<CreatedAccount> {
        let url = self.url(&["accounts"])?;
        debug!(url = %url, with_email = email.is_some(), "Registering account");

        let mut request = self.http.post(&url);
        if let Some(email) = email {
            request = request.json(&RegisterRequest { email });
        }

        let account: UniversalAccount = execute(request).await?;
        let created = account.into_created_account();

        info!(account_id = %created.id, "Account registered");
        Ok(created)
    }

    /// Resolve the id of the account owning the token.
    pub async fn get_id(&self) -> Result<String> {
        let url = self.url(&["accounts", "getid"])?;
        debug!(url = %url, "Fetching account id");

        let account: UniversalAccount = execute(self.authorized(self.http.get(&url))).await?;
        Ok(account.into_account_id())
    }

    /// Fetch one account by id.
    pub async fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let url = self.url(&["accounts", account_id])?;
        debug!(url = %url, account_id = %account_id, "Fetching account");

        let account: UniversalAccount = execute(self.authorized(self.http.get(&url))).await?;
        Ok(account.into_account())
    }

    /// Fetch the account owning the token.
    pub async fn get(&self) -> Result<Account> {
        let account_id = self.get_id().await?;
        self.get_by_id(&account_id).await
    }

    /// Ask the API to issue a new token for the caller's account.
    ///
    /// The new token is delivered out of band; this client keeps using the
    /// token it was built with.
    pub async fn reset_token(&self) -> Result<()> {
        let account_id = self.get_id().await?;
        let url = self.url(&["accounts", account_id.as_str(), "resettoken"])?;
        debug!(url = %url, account_id = %account_id, "Resetting account token");

        execute_empty(self.authorized(self.http.post(&url))).await?;

        info!(account_id = %account_id, "Account token reset");
        Ok(())
    }
}
