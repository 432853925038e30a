//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Local upload storage.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the `book/` and `avatar/` image folders
    #[arg(long, env = "UPLOAD_DIR", default_value = "./uploads")]
    pub upload_dir: PathBuf,
}
