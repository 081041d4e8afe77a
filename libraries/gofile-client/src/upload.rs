//! File upload operations for the Gofile API.

use crate::config::ClientConfig;
use crate::content::{UniversalContent, UploadedFile};
use crate::envelope::{authorize, execute};
use crate::error::Result;
use crate::selector::{HttpProbe, ServerSelector};
use crate::types::{ServerList, UploadOptions, UploadSource};
use reqwest::multipart::Form;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Upload client for the Gofile API.
pub struct UploadClient<'a> {
    http: &'a Client,
    config: &'a ClientConfig,
}

impl<'a> UploadClient<'a> {
    pub(crate) fn new(http: &'a Client, config: &'a ClientConfig) -> Self {
        Self { http, config }
    }

    /// List the servers currently accepting uploads.
    pub async fn get_servers(&self) -> Result<ServerList> {
        let url = format!("{}/servers", self.config.api_url);
        debug!(url = %url, "Fetching upload servers");

        let request = authorize(self.http.get(&url), self.config.token.as_deref());
        let servers: ServerList = execute(request).await?;

        debug!(count = servers.servers.len(), "Fetched upload servers");
        Ok(servers)
    }

    /// Pick the server for the next upload.
    ///
    /// A pinned server is used as-is; otherwise the server list is fetched
    /// and every candidate is probed.
    pub async fn select_server(
        &self,
        pinned: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let selector = ServerSelector::with_seed(
            HttpProbe::new(self.http, &self.config.upload_url),
            self.config.server_seed,
        );

        let candidates = match pinned {
            Some(_) => Vec::new(),
            None => self.get_servers().await?.names(),
        };

        selector
            .select_cancellable(&candidates, pinned, cancel)
            .await
    }

    /// Upload one file.
    ///
    /// # Arguments
    /// * `source` - The bytes to upload and their file name
    /// * `options` - Destination folder, pinned server, name override
    pub async fn upload_file(
        &self,
        source: UploadSource,
        options: UploadOptions,
    ) -> Result<UploadedFile> {
        let cancel = options.cancellation.unwrap_or_else(CancellationToken::new);
        let server = self.select_server(options.server.as_deref(), &cancel).await?;

        let url = format!("{}/contents/uploadfile", self.config.server_url(&server));
        let file_name = options
            .file_name
            .unwrap_or_else(|| source.file_name().to_string());
        let size = source.len();

        debug!(
            url = %url,
            server = %server,
            file = %file_name,
            size = ?size,
            "Uploading file"
        );

        let mut form = Form::new().part("file", source.into_part(Some(file_name.clone())));
        if let Some(folder_id) = options.folder_id {
            form = form.text("folderId", folder_id);
        }

        let request = authorize(self.http.post(&url), self.config.token.as_deref()).multipart(form);
        let uploaded: UniversalContent = execute(request).await?;
        let uploaded = uploaded.into_uploaded_file();

        info!(
            file_id = %uploaded.file_id,
            file = %file_name,
            server = %server,
            size = ?size,
            "File uploaded"
        );

        Ok(uploaded)
    }
}
