//! Voice-alarm phrase entries.

use serde::Serialize;

/// One line of the voice-alarm phrase export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseEntry {
    /// Sequence number as written in the source sheet.
    pub sequence: String,
    /// Final phrase after rule substitution.
    pub phrase: String,
    /// Audio file name (description + suffix).
    pub audio_file: String,
}
