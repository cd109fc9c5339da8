use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{error, info};

use crate::domain::Page;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file format - {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub struct FileRepository;

impl FileRepository {
    /// Writes the page as pretty-printed JSON.
    pub fn save_page(page: &Page, filename: &str) -> PersistenceResult<String> {
        let json = serde_json::to_string_pretty(page)?;
        Self::write(filename, &json)?;
        info!(filename, "saved page snapshot");
        Ok(filename.to_string())
    }

    pub fn load_page(filename: &str) -> PersistenceResult<(Page, String)> {
        let content = fs::read_to_string(filename).inspect_err(|err| {
            error!(filename, %err, "could not read page snapshot");
        })?;
        let page = serde_json::from_str::<Page>(&content)?.normalize();
        info!(filename, "loaded page snapshot");
        Ok((page, filename.to_string()))
    }

    /// Writes the rendered, escaped HTML document for the page.
    pub fn export_html(page: &Page, filename: &str) -> PersistenceResult<String> {
        Self::write(filename, &page.render_html())?;
        info!(filename, "exported page as HTML");
        Ok(filename.to_string())
    }

    fn write(filename: &str, contents: &str) -> PersistenceResult<()> {
        if let Some(parent) = Path::new(filename).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(filename, contents).inspect_err(|err| {
            error!(filename, %err, "write failed");
        })?;
        Ok(())
    }
}
