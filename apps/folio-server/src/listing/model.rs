use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    File,
    Directory,
}

/// One directory entry as reported on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    /// Local modification time, `YYYY-MM-DD HH:MM:SS`.
    #[serde(rename = "date")]
    pub modified_at: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(rename = "size")]
    pub size_kib: f64,
    /// Extension with its leading dot, or empty.
    #[serde(rename = "file_type")]
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingResult {
    pub folder_name: String,
    pub files: Vec<FileEntry>,
}
