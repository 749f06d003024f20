use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{Category, FeedDocument, Story, StoryEntry};
use crate::errors::BoardResult;

/// Split recency-ordered stories into the two columns, capped per column.
///
/// Stories in both categories land in both columns with identical data.
pub fn build_document(stories: &[Story], max_per_column: usize, now: DateTime<Utc>) -> FeedDocument {
    let mut document = FeedDocument::new(now);

    for category in Category::ALL {
        let column = document.column_mut(category);
        column.extend(
            stories
                .iter()
                .filter(|s| s.belongs_to(category))
                .take(max_per_column)
                .map(StoryEntry::from),
        );
    }

    document
}

/// Write the document so readers only ever see a complete file.
pub fn write_document(document: &FeedDocument, path: &Path) -> BoardResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut json = document.to_json_pretty()?;
    json.push('\n');

    let tmp_path = temp_path_for(path);
    let written = fs::write(&tmp_path, json).and_then(|_| fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    info!(
        path = %path.display(),
        government = document.government.len(),
        nonprofit = document.nonprofit.len(),
        "wrote feed document"
    );

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
