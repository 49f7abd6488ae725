//! Voice-alarm phrase text writer.

use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::model::PhraseEntry;

/// Render phrase entries: one `{sequence} {phrase} {audio_file}` line each, no header.
pub fn generate_phrase_text(entries: &[PhraseEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{} {} {}\n", e.sequence, e.phrase, e.audio_file))
        .collect()
}

/// Write phrase entries to a UTF-8 text file.
pub fn write_phrase_file(path: &Path, entries: &[PhraseEntry]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_phrase_text(entries))?;
    info!("Wrote {} phrases to {}", entries.len(), path.display());
    Ok(())
}
