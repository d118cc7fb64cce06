//! Drop Zone
//!
//! File selection and client-side validation. A drop is rejected here, before
//! any request, unless it is exactly one CSV or XLSX file within the size
//! limit.

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::icon::IconName;
use super::frame;
use crate::api::UploadFile;

pub const CSV_MIME: &str = "text/csv";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Accepted spreadsheet formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Xlsx,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(FileKind::Csv),
            "xlsx" => Some(FileKind::Xlsx),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            FileKind::Csv => CSV_MIME,
            FileKind::Xlsx => XLSX_MIME,
        }
    }
}

/// Why a drop was refused
#[derive(Debug, Error, PartialEq)]
pub enum DropError {
    #[error("No file selected")]
    NoFile,

    #[error("Only one file can be uploaded at a time ({0} dropped)")]
    TooManyFiles(usize),

    #[error("File type of '{0}' is not supported. Please choose a .csv or .xlsx file.")]
    UnsupportedType(String),

    #[error("File '{filename}' is {size} bytes; the limit is {max} bytes")]
    TooLarge { filename: String, size: u64, max: u64 },

    #[error("An upload is already in progress")]
    Busy,

    #[error("Cannot read {path:?}: {error}")]
    Io { path: PathBuf, error: String },
}

/// A validated file, ready to upload
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub filename: String,
    pub kind: FileKind,
    pub size: u64,
}

impl SelectedFile {
    /// Read the file into a multipart-ready payload
    pub async fn read(&self) -> std::io::Result<UploadFile> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(UploadFile {
            filename: self.filename.clone(),
            mime: self.kind.mime().to_string(),
            bytes,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DropZone {
    max_file_size_bytes: u64,
}

impl DropZone {
    pub fn new(max_file_size_bytes: u64) -> Self {
        Self {
            max_file_size_bytes,
        }
    }

    /// Validate a drop. Touches only file metadata.
    pub fn accept(&self, files: &[PathBuf]) -> Result<SelectedFile, DropError> {
        let path = match files {
            [] => return Err(DropError::NoFile),
            [single] => single,
            many => return Err(DropError::TooManyFiles(many.len())),
        };

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let kind = FileKind::from_path(path)
            .ok_or_else(|| DropError::UnsupportedType(filename.clone()))?;

        let metadata = std::fs::metadata(path).map_err(|e| DropError::Io {
            path: path.clone(),
            error: e.to_string(),
        })?;
        if !metadata.is_file() {
            return Err(DropError::Io {
                path: path.clone(),
                error: "not a regular file".to_string(),
            });
        }

        let size = metadata.len();
        if size > self.max_file_size_bytes {
            return Err(DropError::TooLarge {
                filename,
                size,
                max: self.max_file_size_bytes,
            });
        }

        Ok(SelectedFile {
            path: path.clone(),
            filename,
            kind,
            size,
        })
    }

    pub fn render(&self, loading: bool) -> Vec<String> {
        let body = if loading {
            vec![
                String::new(),
                format!("{} Uploading...", IconName::LoaderCircle.glyph()),
                String::new(),
            ]
        } else {
            vec![
                format!("{} Drag and drop your file here", IconName::UploadCloud.glyph()),
                "or click to select (Formats: .xlsx, .csv)".to_string(),
                String::new(),
            ]
        };
        frame(None, &body, 46)
    }
}
