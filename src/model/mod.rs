//! Data model types for point-list normalization.

mod outcome;
mod phrase;
mod profile;
mod record;
mod sheet;
mod variant;

pub use outcome::{SheetOutcome, SheetResult, SkipReason};
pub use phrase::PhraseEntry;
pub use profile::{normalize_label, ColumnProfile};
pub use record::{CanonicalField, CanonicalRecord, FieldValue, FIELD_COUNT};
pub use sheet::{Cell, RawSheet, Row, Workbook};
pub use variant::{FormatVariant, SignalType};
