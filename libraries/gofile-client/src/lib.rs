//! Gofile Client
//!
//! HTTP client library for the Gofile file-hosting API.
//!
//! # Features
//!
//! - **Accounts**: Register guest or email accounts, fetch account details, reset tokens
//! - **Upload**: Probe the upload servers, pick one, upload from bytes, readers, paths or URLs
//! - **Contents**: Create folders, update, copy, move and delete contents
//! - **Direct links**: Create, update and delete direct download links
//!
//! Every reply is decoded through the `{status, data}` envelope; non-"ok"
//! statuses surface as [`StatusError`] inside [`GofileError::Status`].
//!
//! # Example
//!
//! ```ignore
//! use gofile_client::{ClientConfig, ContentUpdate, GofileClient, UploadOptions, UploadSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GofileClient::new(ClientConfig::load()?)?;
//!
//!     let source = UploadSource::from_path("report.pdf").await?;
//!     let uploaded = client.upload_file(source, UploadOptions::new()).await?;
//!
//!     match client
//!         .contents()
//!         .update_content(&uploaded.file_id, ContentUpdate::new().name("q3.pdf"))
//!         .await
//!     {
//!         Err(e) if e.is_premium_required() => println!("Renaming needs premium"),
//!         other => other?,
//!     }
//!
//!     Ok(())
//! }
//! ```

mod account;
mod accounts;
mod client;
mod config;
mod content;
mod contents;
mod envelope;
mod error;
mod selector;
mod types;
mod upload;

// Re-export main types
pub use account::{Account, AccountStats, AccountTier, CreatedAccount, UniversalAccount};
pub use client::GofileClient;
pub use config::{ClientConfig, SERVER_PLACEHOLDER};
pub use content::{
    normalize, Children, Content, ContentType, CreatedFolder, File, Folder, UniversalContent,
    UploadedFile,
};
pub use envelope::{decode, Response};
pub use error::{GofileError, Result, StatusError};
pub use selector::{HttpProbe, ServerProbe, ServerSelector, DEFAULT_SEED};
pub use types::{
    ContentUpdate, DirectLink, ServerEntry, ServerList, UpdateAttribute, UploadOptions,
    UploadSource,
};

// Re-export sub-clients for direct use if needed
pub use accounts::AccountsClient;
pub use contents::ContentsClient;
pub use upload::UploadClient;

pub use tokio_util::sync::CancellationToken;
