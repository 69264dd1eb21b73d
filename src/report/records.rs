//! Record-table export: one CSV grid with the full attribute table for every
//! record in the sample, header in schema declaration order.

use std::path::Path;

use crate::core::{ArticleSet, Result, ATTRIBUTES};

pub fn export_records(articles: &ArticleSet, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(ATTRIBUTES.iter().map(|attr| attr.name))?;
    for article in articles {
        writer.write_record(ATTRIBUTES.iter().map(|attr| attr.display(article)))?;
    }
    writer.flush()?;
    log::info!("exported {} records to {}", articles.len(), path.display());
    Ok(())
}
