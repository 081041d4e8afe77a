//! Content model: the permissive wire shape and its typed projections.
//!
//! The API emits different key subsets for the same logical entity depending
//! on the endpoint (detail, nested children, upload, folder creation). Every
//! payload is first parsed into [`UniversalContent`], where each field is
//! optional, and only then projected into a concrete type.

use crate::error::{GofileError, Result, StatusError};
use crate::types::DirectLink;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Discriminant of a content entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Folder,
    File,
}

impl ContentType {
    /// Parse a wire `type` tag. Unrecognised tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "folder" => Some(Self::Folder),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
        }
    }
}

/// Every field any content payload may carry. Absent means "this payload
/// variant does not carry the field".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversalContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Raw `type` tag, kept as a string so unknown tags still parse
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    // Folder attributes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_download_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Children>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_owner: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_root: Option<bool>,

    // File attributes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_selected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_links: Option<BTreeMap<String, DirectLink>>,

    // Upload and folder-creation replies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_page: Option<String>,
}

impl UniversalContent {
    /// Parse an untyped payload. A `null` or absent payload carries no fields.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value)
            .map_err(|e| GofileError::ParseError(format!("Unexpected content shape: {}", e)))
    }

    /// Whether the caller may not see this content: no id and not public.
    pub fn is_private(&self) -> bool {
        self.id.as_deref().unwrap_or_default().is_empty() && !self.public.unwrap_or(false)
    }

    /// The content type, if the tag is present and recognised.
    pub fn kind(&self) -> Option<ContentType> {
        self.tag.as_deref().and_then(ContentType::from_tag)
    }

    /// Project into a folder, zero-filling absent fields.
    pub fn into_folder(self) -> Folder {
        Folder {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            parent_folder: self.parent_folder.unwrap_or_default(),
            code: self.code.unwrap_or_default(),
            create_time: self.create_time.unwrap_or_default(),
            public: self.public.unwrap_or_default(),
            total_download_count: self.total_download_count.unwrap_or_default(),
            total_size: self.total_size.unwrap_or_default(),
            children_ids: self.children_ids.unwrap_or_default(),
            children: self.children,
            is_owner: self.is_owner,
            is_root: self.is_root,
        }
    }

    /// Project into a file, zero-filling absent fields.
    pub fn into_file(self) -> File {
        File {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            parent_folder: self.parent_folder.unwrap_or_default(),
            create_time: self.create_time.unwrap_or_default(),
            size: self.size.unwrap_or_default(),
            download_count: self.download_count.unwrap_or_default(),
            md5: self.md5.unwrap_or_default(),
            mimetype: self.mimetype.unwrap_or_default(),
            server_selected: self.server_selected.unwrap_or_default(),
            link: self.link.unwrap_or_default(),
            thumbnail: self.thumbnail,
            direct_links: self.direct_links.unwrap_or_default(),
        }
    }

    /// Project a folder-creation reply.
    pub fn into_created_folder(self) -> CreatedFolder {
        let kind = self.kind();
        CreatedFolder {
            kind,
            folder_id: self.folder_id.or(self.id).unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            parent_folder: self.parent_folder.unwrap_or_default(),
            create_time: self.create_time.unwrap_or_default(),
            code: self.code.unwrap_or_default(),
        }
    }

    /// Project an upload reply.
    pub fn into_uploaded_file(self) -> UploadedFile {
        UploadedFile {
            file_id: self.file_id.or(self.id).unwrap_or_default(),
            file_name: self.file_name.or(self.name).unwrap_or_default(),
            code: self.code.unwrap_or_default(),
            download_page: self.download_page.unwrap_or_default(),
            md5: self.md5.unwrap_or_default(),
            parent_folder: self.parent_folder.unwrap_or_default(),
        }
    }
}

/// Materialise a content entry, choosing the variant from its `type` tag.
pub fn normalize(universal: UniversalContent) -> Result<Content> {
    match universal.kind() {
        Some(ContentType::Folder) => Ok(Content::Folder(universal.into_folder())),
        Some(ContentType::File) => Ok(Content::File(universal.into_file())),
        None => Err(StatusError::InvalidType.into()),
    }
}

/// A file or a folder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Folder(Folder),
    File(File),
}

impl Content {
    /// Parse untyped JSON through the permissive shape.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        normalize(UniversalContent::from_value(value)?)
    }

    pub fn kind(&self) -> ContentType {
        match self {
            Self::Folder(_) => ContentType::Folder,
            Self::File(_) => ContentType::File,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Folder(folder) => &folder.id,
            Self::File(file) => &file.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Folder(folder) => &folder.name,
            Self::File(file) => &file.name,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Self::Folder(folder) => Some(folder),
            Self::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Self::File(file) => Some(file),
            Self::Folder(_) => None,
        }
    }
}

/// A folder. `children` is only populated by an explicit fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub parent_folder: String,
    pub code: String,
    pub create_time: i64,
    pub public: bool,
    pub total_download_count: u64,
    pub total_size: u64,
    pub children_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Children>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_owner: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_root: Option<bool>,
}

impl Folder {
    /// Children map, empty when the listing did not expand it.
    pub fn children(&self) -> &Children {
        static EMPTY: Children = Children(BTreeMap::new());
        self.children.as_ref().unwrap_or(&EMPTY)
    }
}

/// A file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub id: String,
    pub name: String,
    pub parent_folder: String,
    pub create_time: i64,
    pub size: u64,
    pub download_count: u64,
    pub md5: String,
    pub mimetype: String,
    pub server_selected: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub direct_links: BTreeMap<String, DirectLink>,
}

/// Children of a folder, keyed by child id.
///
/// Entries may be partial; those without a usable `type` tag are skipped by
/// [`Children::folders`] and [`Children::files`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Children(BTreeMap<String, UniversalContent>);

impl Children {
    pub fn new(entries: BTreeMap<String, UniversalContent>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&UniversalContent> {
        self.0.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &UniversalContent)> {
        self.0.iter()
    }

    /// Folder-tagged children, projected.
    pub fn folders(&self) -> impl Iterator<Item = Folder> + '_ {
        self.of_kind(ContentType::Folder)
            .map(|entry| entry.clone().into_folder())
    }

    /// File-tagged children, projected.
    pub fn files(&self) -> impl Iterator<Item = File> + '_ {
        self.of_kind(ContentType::File)
            .map(|entry| entry.clone().into_file())
    }

    fn of_kind(&self, kind: ContentType) -> impl Iterator<Item = &UniversalContent> + '_ {
        self.0
            .values()
            .filter(move |entry| entry.kind() == Some(kind))
    }
}

/// Reply of a folder creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedFolder {
    pub folder_id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContentType>,
    pub name: String,
    pub parent_folder: String,
    pub create_time: i64,
    pub code: String,
}

/// Reply of a file upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_id: String,
    pub file_name: String,
    pub code: String,
    pub download_page: String,
    pub md5: String,
    pub parent_folder: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn universal(value: serde_json::Value) -> UniversalContent {
        UniversalContent::from_value(value).unwrap()
    }

    #[test]
    fn test_folder_tag_yields_folder() {
        let content = Content::from_value(json!({
            "id": "f1",
            "type": "folder",
            "name": "root",
            "childrenIds": ["a", "b"],
            "public": true
        }))
        .unwrap();

        let folder = content.as_folder().expect("folder variant");
        assert_eq!(folder.id, "f1");
        assert_eq!(folder.children_ids, vec!["a", "b"]);
        assert!(folder.public);
        assert!(content.as_file().is_none());
        assert_eq!(content.kind(), ContentType::Folder);
    }

    #[test]
    fn test_file_tag_yields_file() {
        let content = Content::from_value(json!({
            "id": "x1",
            "type": "file",
            "name": "a.txt",
            "size": 2,
            "md5": "444bcb3a3fcf8389296c49467f27e1d6",
            "directLinks": {
                "dl1": {"directLink": "https://store1.gofile.io/download/direct/dl1/a.txt"}
            }
        }))
        .unwrap();

        let file = content.as_file().expect("file variant");
        assert_eq!(file.name, "a.txt");
        assert_eq!(file.size, 2);
        assert_eq!(
            file.direct_links["dl1"].direct_link.as_deref(),
            Some("https://store1.gofile.io/download/direct/dl1/a.txt")
        );
        assert!(content.as_folder().is_none());
    }

    #[test]
    fn test_missing_or_unknown_tag_is_invalid_type() {
        for value in [json!({"id": "x"}), json!({"id": "x", "type": "symlink"})] {
            let err = normalize(universal(value)).unwrap_err();
            assert!(matches!(err, GofileError::Status(StatusError::InvalidType)));
        }
    }

    #[test]
    fn test_absent_fields_default_to_zero() {
        let folder = universal(json!({"type": "folder"})).into_folder();
        assert_eq!(folder, Folder::default());
        assert!(!folder.public);
        assert!(folder.children().is_empty());

        let file = universal(json!({"type": "file"})).into_file();
        assert_eq!(file, File::default());
    }

    #[test]
    fn test_children_partitioning() {
        let folder = Content::from_value(json!({
            "id": "root",
            "type": "folder",
            "children": {
                "d1": {"id": "d1", "type": "folder", "name": "docs"},
                "d2": {"id": "d2", "type": "folder", "name": "pics"},
                "f1": {"id": "f1", "type": "file", "name": "a.txt", "size": 10},
                "f2": {"id": "f2", "type": "file", "name": "b.txt"},
                "f3": {"id": "f3", "type": "file", "name": "c.txt"},
                "p1": {"id": "p1", "name": "partial"},
                "p2": {"id": "p2", "type": "weird"}
            }
        }))
        .unwrap();

        let children = folder.as_folder().unwrap().children();
        assert_eq!(children.len(), 7);

        let folders: Vec<Folder> = children.folders().collect();
        let files: Vec<File> = children.files().collect();
        assert_eq!(folders.len(), 2);
        assert_eq!(files.len(), 3);

        let ids: Vec<&str> = folders
            .iter()
            .map(|f| f.id.as_str())
            .chain(files.iter().map(|f| f.id.as_str()))
            .collect();
        assert!(!ids.contains(&"p1"));
        assert!(!ids.contains(&"p2"));
        assert_eq!(files[0].size, 10);
    }

    #[test]
    fn test_created_folder_projection() {
        let created = universal(json!({
            "folderId": "nf",
            "type": "folder",
            "name": "new",
            "parentFolder": "root",
            "createTime": 1700000000,
            "code": "AbC"
        }))
        .into_created_folder();

        assert_eq!(created.folder_id, "nf");
        assert_eq!(created.parent_folder, "root");
        assert_eq!(created.create_time, 1700000000);
        assert_eq!(created.kind, Some(ContentType::Folder));

        let created = universal(json!({"id": "plain-id"})).into_created_folder();
        assert_eq!(created.folder_id, "plain-id");
        assert!(created.kind.is_none());
    }

    #[test]
    fn test_private_detection() {
        assert!(UniversalContent::from_value(serde_json::Value::Null)
            .unwrap()
            .is_private());
        assert!(universal(json!({"id": "", "public": false})).is_private());
        assert!(universal(json!({"type": "folder"})).is_private());

        assert!(!universal(json!({"public": true})).is_private());
        assert!(!universal(json!({"id": "c1"})).is_private());
    }

    #[test]
    fn test_uploaded_file_projection() {
        let uploaded = universal(json!({
            "code": "xYz",
            "downloadPage": "https://gofile.io/d/xYz",
            "fileId": "file-1",
            "fileName": "test.txt",
            "md5": "abc",
            "parentFolder": "pf"
        }))
        .into_uploaded_file();

        assert_eq!(uploaded.file_id, "file-1");
        assert_eq!(uploaded.file_name, "test.txt");
        assert_eq!(uploaded.download_page, "https://gofile.io/d/xYz");

        let uploaded = universal(json!({"id": "file-2", "name": "b.bin"})).into_uploaded_file();
        assert_eq!(uploaded.file_id, "file-2");
        assert_eq!(uploaded.file_name, "b.bin");
    }
}
