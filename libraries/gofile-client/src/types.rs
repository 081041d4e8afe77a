//! Types for Gofile API requests and responses.

use crate::error::{GofileError, Result};
use chrono::{DateTime, Utc};
use reqwest::multipart::Part;
use reqwest::Body;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;
use tokio_util::sync::CancellationToken;

// =============================================================================
// Server Types
// =============================================================================

/// An upload server returned by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerEntry {
    pub name: String,
    #[serde(default)]
    pub zone: String,
}

/// Reply of `GET /servers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerList {
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
}

impl ServerList {
    /// Server names in the order the API listed them.
    pub fn names(&self) -> Vec<String> {
        self.servers.iter().map(|s| s.name.clone()).collect()
    }
}

// =============================================================================
// Direct Link Types
// =============================================================================

/// Direct link settings. Callers fill the input fields; the API fills
/// `direct_link` in its reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DirectLink {
    /// `user:password` pairs allowed to use the link
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub auth: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub domains_allowed: Vec<String>,
    /// Expiry as epoch seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<i64>,
    /// Whether the link requires authentication
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_req_link: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_ips_allowed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_link: Option<String>,
}

impl DirectLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expire_at(mut self, expiry: DateTime<Utc>) -> Self {
        self.expire_time = Some(expiry.timestamp());
        self
    }

    pub fn with_auth(mut self, user: &str, password: &str) -> Self {
        self.auth.push(format!("{}:{}", user, password));
        self.is_req_link = true;
        self
    }

    pub fn allow_domain(mut self, domain: impl Into<String>) -> Self {
        self.domains_allowed.push(domain.into());
        self
    }

    pub fn allow_source_ip(mut self, ip: impl Into<String>) -> Self {
        self.source_ips_allowed.push(ip.into());
        self
    }
}

// =============================================================================
// Content Update Types
// =============================================================================

/// A single attribute change for `PUT /contents/{id}/update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAttribute {
    Name(String),
    Description(String),
    Tags(Vec<String>),
    Public(bool),
    Expiry(DateTime<Utc>),
    Password(String),
}

impl UpdateAttribute {
    /// Wire name of the attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Description(_) => "description",
            Self::Tags(_) => "tags",
            Self::Public(_) => "public",
            Self::Expiry(_) => "expiry",
            Self::Password(_) => "password",
        }
    }

    /// Wire value of the attribute.
    pub fn value(&self) -> String {
        match self {
            Self::Name(v) | Self::Description(v) | Self::Password(v) => v.clone(),
            Self::Tags(tags) => tags.join(","),
            Self::Public(public) => public.to_string(),
            Self::Expiry(expiry) => expiry.timestamp().to_string(),
        }
    }
}

/// Builder for a content update. Holds at most one attribute; the last
/// setter called wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentUpdate {
    attribute: Option<UpdateAttribute>,
}

impl ContentUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.set(UpdateAttribute::Name(name.into()))
    }

    pub fn description(self, description: impl Into<String>) -> Self {
        self.set(UpdateAttribute::Description(description.into()))
    }

    pub fn tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(UpdateAttribute::Tags(
            tags.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn public(self, public: bool) -> Self {
        self.set(UpdateAttribute::Public(public))
    }

    pub fn expiry(self, expiry: DateTime<Utc>) -> Self {
        self.set(UpdateAttribute::Expiry(expiry))
    }

    pub fn password(self, password: impl Into<String>) -> Self {
        self.set(UpdateAttribute::Password(password.into()))
    }

    pub fn attribute(&self) -> Option<&UpdateAttribute> {
        self.attribute.as_ref()
    }

    fn set(mut self, attribute: UpdateAttribute) -> Self {
        self.attribute = Some(attribute);
        self
    }

    pub(crate) fn request(&self) -> Result<UpdateContentRequest> {
        let attribute = self
            .attribute
            .as_ref()
            .ok_or(GofileError::NoAttributeProvided)?;
        Ok(UpdateContentRequest {
            attribute: attribute.name(),
            attribute_value: attribute.value(),
        })
    }
}

impl From<UpdateAttribute> for ContentUpdate {
    fn from(attribute: UpdateAttribute) -> Self {
        Self {
            attribute: Some(attribute),
        }
    }
}

// =============================================================================
// Request Bodies
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateFolderRequest<'a> {
    pub parent_folder_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateContentRequest {
    pub attribute: &'static str,
    pub attribute_value: String,
}

/// Body of the bulk endpoints; ids travel comma-joined.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContentsRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<&'a str>,
    pub contents_id: String,
}

impl<'a> ContentsRequest<'a> {
    pub fn new<S: AsRef<str>>(folder_id: Option<&'a str>, content_ids: &[S]) -> Self {
        let ids: Vec<&str> = content_ids.iter().map(AsRef::as_ref).collect();
        Self {
            folder_id,
            contents_id: ids.join(","),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FolderRequest<'a> {
    pub folder_id: &'a str,
}

// =============================================================================
// Upload Types
// =============================================================================

enum Payload {
    Bytes(Vec<u8>),
    Stream(Body),
}

/// Something to upload: a byte source plus the file name to send.
pub struct UploadSource {
    file_name: String,
    payload: Payload,
}

impl UploadSource {
    /// Upload an in-memory buffer.
    pub fn from_bytes(data: impl Into<Vec<u8>>, file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            payload: Payload::Bytes(data.into()),
        }
    }

    /// Stream from an async reader.
    pub fn from_reader<R>(reader: R, file_name: impl Into<String>) -> Self
    where
        R: AsyncRead + Send + Sync + 'static,
    {
        Self {
            file_name: file_name.into(),
            payload: Payload::Stream(Body::wrap_stream(ReaderStream::new(reader))),
        }
    }

    /// Read a local file. The file name is the last path component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(GofileError::InvalidParameter("file path is empty".into()));
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                GofileError::InvalidParameter(format!("no file name in {}", path.display()))
            })?
            .to_string();

        let data = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(data, file_name))
    }

    /// Download a remote file and infer its name from the reply.
    pub async fn from_url(http: &reqwest::Client, url: &str) -> Result<Self> {
        if url.is_empty() {
            return Err(GofileError::InvalidParameter("file url is empty".into()));
        }

        let response = http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())?;

        let header = |name: reqwest::header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let disposition = header(reqwest::header::CONTENT_DISPOSITION);
        let content_type = header(reqwest::header::CONTENT_TYPE);

        let data = response.bytes().await?.to_vec();
        let file_name = infer_file_name(
            url,
            disposition.as_deref(),
            content_type.as_deref(),
            &data,
        );

        Ok(Self::from_bytes(data, file_name))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Known size of the payload, `None` when streamed.
    pub fn len(&self) -> Option<usize> {
        match &self.payload {
            Payload::Bytes(data) => Some(data.len()),
            Payload::Stream(_) => None,
        }
    }

    pub(crate) fn into_part(self, file_name: Option<String>) -> Part {
        let file_name = file_name.unwrap_or(self.file_name);
        let part = match self.payload {
            Payload::Bytes(data) => Part::bytes(data),
            Payload::Stream(body) => Part::stream(body),
        };
        part.file_name(file_name)
    }
}

impl fmt::Debug for UploadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadSource")
            .field("file_name", &self.file_name)
            .field("len", &self.len())
            .finish()
    }
}

/// Infer a file name for a remote download.
///
/// Order: `Content-Disposition` filename, last non-empty path segment,
/// `"unknown"`. A name without an extension gets one from the content type
/// or, failing that, from sniffing the bytes.
fn infer_file_name(
    url: &str,
    disposition: Option<&str>,
    content_type: Option<&str>,
    data: &[u8],
) -> String {
    let from_disposition = disposition
        .and_then(|d| d.split("filename=").nth(1))
        .map(|name| name.split(';').next().unwrap_or(name))
        .map(|name| name.trim().trim_matches('"').to_string())
        .filter(|name| !name.is_empty());

    let from_path = || {
        url::Url::parse(url).ok().and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                .map(str::to_string)
        })
    };

    let mut file_name = from_disposition
        .or_else(from_path)
        .unwrap_or_else(|| "unknown".to_string());

    if !file_name.contains('.') {
        let extension = content_type
            .and_then(|ct| ct.split(';').next())
            .and_then(|ct| ct.trim().split('/').nth(1))
            .filter(|subtype| !subtype.is_empty())
            .map(str::to_string)
            .or_else(|| infer::get(data).map(|kind| kind.extension().to_string()));

        if let Some(extension) = extension {
            file_name = format!("{}.{}", file_name, extension);
        }
    }

    file_name
}

/// Options for a file upload.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// Destination folder; the API creates a new one when absent
    pub folder_id: Option<String>,
    /// Pinned upload server, skips discovery and probing
    pub server: Option<String>,
    /// Overrides the source's file name
    pub file_name: Option<String>,
    /// Cancels server selection while probes are in flight
    pub cancellation: Option<CancellationToken>,
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_folder_id(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}
