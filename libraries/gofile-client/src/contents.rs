//! Content operations for the Gofile API.

use crate::config::ClientConfig;
use crate::content::{normalize, Content, CreatedFolder, UniversalContent};
use crate::envelope::{authorize, execute, execute_empty, Response};
use crate::error::{Result, StatusError};
use crate::types::{ContentUpdate, ContentsRequest, CreateFolderRequest, DirectLink, FolderRequest};
use reqwest::{Client, RequestBuilder};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Content client for the Gofile API.
pub struct ContentsClient<'a> {
    http: &'a Client,
    config: &'a ClientConfig,
}

impl<'a> ContentsClient<'a> {
    pub(crate) fn new(http: &'a Client, config: &'a ClientConfig) -> Self {
        Self { http, config }
    }

    fn url(&self, segments: &[&str]) -> Result<String> {
        self.config.endpoint(segments)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        authorize(request, self.config.token.as_deref())
    }

    /// Create a folder under `parent_folder_id`.
    pub async fn create_folder(
        &self,
        parent_folder_id: &str,
        folder_name: Option<&str>,
    ) -> Result<CreatedFolder> {
        let url = self.url(&["contents", "createFolder"])?;
        debug!(url = %url, parent_folder_id = %parent_folder_id, "Creating folder");

        let request = CreateFolderRequest {
            parent_folder_id,
            folder_name,
        };
        let created: UniversalContent =
            execute(self.authorized(self.http.post(&url)).json(&request)).await?;
        let created = created.into_created_folder();

        info!(
            folder_id = %created.folder_id,
            parent_folder_id = %parent_folder_id,
            "Folder created"
        );
        Ok(created)
    }

    /// Change one attribute of a content.
    ///
    /// Fails with `NoAttributeProvided` before any request when `update`
    /// carries no attribute.
    pub async fn update_content(&self, content_id: &str, update: ContentUpdate) -> Result<()> {
        let body = update.request()?;
        let url = self.url(&["contents", content_id, "update"])?;
        debug!(
            url = %url,
            content_id = %content_id,
            attribute = body.attribute,
            "Updating content"
        );

        execute_empty(self.authorized(self.http.put(&url)).json(&body)).await
    }

    /// Delete several contents at once.
    ///
    /// The call fails if any item reports a non-"ok" status even when the
    /// outer envelope succeeded. Items are checked in id order. On success the
    /// deleted ids are returned in the same order.
    pub async fn delete_contents<S: AsRef<str>>(&self, content_ids: &[S]) -> Result<Vec<String>> {
        let url = self.url(&["contents"])?;
        let request = ContentsRequest::new(None, content_ids);
        debug!(url = %url, contents_id = %request.contents_id, "Deleting contents");

        let items: BTreeMap<String, Response> =
            execute(self.authorized(self.http.delete(&url)).json(&request)).await?;

        for (content_id, item) in &items {
            if let Some(error) = StatusError::from_status(&item.status) {
                warn!(
                    content_id = %content_id,
                    status = %item.status,
                    "Content was not deleted"
                );
                return Err(error.into());
            }
        }

        info!(count = items.len(), "Contents deleted");
        Ok(items.into_keys().collect())
    }

    /// Delete a single content.
    pub async fn delete_content(&self, content_id: &str) -> Result<()> {
        let url = self.url(&["contents", content_id])?;
        debug!(url = %url, content_id = %content_id, "Deleting content");

        execute_empty(self.authorized(self.http.delete(&url))).await?;

        info!(content_id = %content_id, "Content deleted");
        Ok(())
    }

    /// Fetch a content, with its children when it is a folder.
    pub async fn get_content(&self, content_id: &str) -> Result<Content> {
        let url = self.url(&["contents", content_id])?;
        debug!(url = %url, content_id = %content_id, "Fetching content");

        let data: serde_json::Value = execute(self.authorized(self.http.get(&url))).await?;
        let universal = UniversalContent::from_value(data)?;

        if universal.is_private() {
            return Err(StatusError::PrivateContent.into());
        }

        let content = normalize(universal)?;
        debug!(
            content_id = %content_id,
            kind = content.kind().as_str(),
            "Fetched content"
        );
        Ok(content)
    }

    /// Create a direct link for a content.
    pub async fn create_direct_link(
        &self,
        content_id: &str,
        direct_link: &DirectLink,
    ) -> Result<DirectLink> {
        let url = self.url(&["contents", content_id, "directlinks"])?;
        debug!(url = %url, content_id = %content_id, "Creating direct link");

        let link: DirectLink =
            execute(self.authorized(self.http.post(&url)).json(direct_link)).await?;

        info!(content_id = %content_id, "Direct link created");
        Ok(link)
    }

    /// Update an existing direct link.
    pub async fn update_direct_link(
        &self,
        content_id: &str,
        direct_link_id: &str,
        direct_link: &DirectLink,
    ) -> Result<DirectLink> {
        let url = self.url(&["contents", content_id, "directlinks", direct_link_id])?;
        debug!(
            url = %url,
            content_id = %content_id,
            direct_link_id = %direct_link_id,
            "Updating direct link"
        );

        execute(self.authorized(self.http.put(&url)).json(direct_link)).await
    }

    /// Delete a direct link.
    pub async fn delete_direct_link(&self, content_id: &str, direct_link_id: &str) -> Result<()> {
        let url = self.url(&["contents", content_id, "directlinks", direct_link_id])?;
        debug!(
            url = %url,
            content_id = %content_id,
            direct_link_id = %direct_link_id,
            "Deleting direct link"
        );

        execute_empty(self.authorized(self.http.delete(&url))).await
    }

    /// Copy several contents into `folder_id`.
    pub async fn copy_contents<S: AsRef<str>>(&self, folder_id: &str, content_ids: &[S]) -> Result<()> {
        let url = self.url(&["contents", "copy"])?;
        let request = ContentsRequest::new(Some(folder_id), content_ids);
        debug!(url = %url, folder_id = %folder_id, contents_id = %request.contents_id, "Copying contents");

        execute_empty(self.authorized(self.http.post(&url)).json(&request)).await
    }

    /// Copy one content into `folder_id`.
    pub async fn copy_content(&self, folder_id: &str, content_id: &str) -> Result<()> {
        let url = self.url(&["contents", content_id, "copy"])?;
        debug!(url = %url, folder_id = %folder_id, content_id = %content_id, "Copying content");

        execute_empty(
            self.authorized(self.http.post(&url))
                .json(&FolderRequest { folder_id }),
        )
        .await
    }

    /// Move several contents into `folder_id`.
    pub async fn move_contents<S: AsRef<str>>(&self, folder_id: &str, content_ids: &[S]) -> Result<()> {
        let url = self.url(&["contents", "move"])?;
        let request = ContentsRequest::new(Some(folder_id), content_ids);
        debug!(url = %url, folder_id = %folder_id, contents_id = %request.contents_id, "Moving contents");

        execute_empty(self.authorized(self.http.put(&url)).json(&request)).await
    }

    /// Move one content into `folder_id`.
    pub async fn move_content(&self, folder_id: &str, content_id: &str) -> Result<()> {
        let url = self.url(&["contents", content_id, "move"])?;
        debug!(url = %url, folder_id = %folder_id, content_id = %content_id, "Moving content");

        execute_empty(
            self.authorized(self.http.put(&url))
                .json(&FolderRequest { folder_id }),
        )
        .await
    }
}
