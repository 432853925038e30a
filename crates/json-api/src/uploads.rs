//! Local image storage under the upload directory.

use std::{
    io,
    path::{Path, PathBuf},
};

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::Deserialize;
use thiserror::Error;
use tokio::fs;
use tracing::{error, warn};
use uuid::Uuid;

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Which image folder a file lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ImageKind {
    Book,
    Avatar,
}

impl ImageKind {
    const ALL: [Self; 2] = [Self::Book, Self::Avatar];

    fn dir_name(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Avatar => "avatar",
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum UploadError {
    #[error("only {} images are accepted", ALLOWED_EXTENSIONS.join(", "))]
    UnsupportedType,

    #[error("invalid file name")]
    InvalidFileName,

    #[error("upload storage error")]
    Io(#[from] io::Error),
}

pub(crate) fn into_status_error(error: UploadError) -> StatusError {
    match error {
        UploadError::UnsupportedType | UploadError::InvalidFileName => {
            StatusError::bad_request().brief(error.to_string())
        }
        UploadError::Io(source) => {
            error!("failed to store upload: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Uploads {
    root: PathBuf,
}

impl Uploads {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the `book/` and `avatar/` folders if they are missing.
    pub(crate) async fn ensure_dirs(&self) -> io::Result<()> {
        for kind in ImageKind::ALL {
            fs::create_dir_all(self.root.join(kind.dir_name())).await?;
        }

        Ok(())
    }

    /// Path of a stored image. Names that could escape the folder are rejected.
    pub(crate) fn locate(&self, kind: ImageKind, file_name: &str) -> Result<PathBuf, UploadError> {
        let safe = !file_name.is_empty()
            && !file_name.starts_with('.')
            && !file_name.contains("..")
            && file_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));

        if !safe {
            return Err(UploadError::InvalidFileName);
        }

        Ok(self.root.join(kind.dir_name()).join(file_name))
    }

    /// Copy an uploaded temp file into place under a fresh name and return that name.
    pub(crate) async fn store(
        &self,
        kind: ImageKind,
        temp_path: &Path,
        original_name: Option<&str>,
    ) -> Result<String, UploadError> {
        let extension = original_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
            .ok_or(UploadError::UnsupportedType)?;

        let file_name = format!("{}.{extension}", Uuid::now_v7().simple());
        let target = self.locate(kind, &file_name)?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::copy(temp_path, &target).await?;

        Ok(file_name)
    }

    /// Remove a stored image whose database record could not be written.
    pub(crate) async fn discard(&self, kind: ImageKind, file_name: &str) {
        let Ok(path) = self.locate(kind, file_name) else {
            return;
        };

        if let Err(source) = fs::remove_file(&path).await {
            warn!(path = %path.display(), "failed to discard upload: {source}");
        }
    }
}
