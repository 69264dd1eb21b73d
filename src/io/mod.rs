pub mod loader;

pub use loader::{load_articles, LoadedArticles};

use std::fs;
use std::path::Path;

use crate::core::Result;

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
