//! Output writers: canonical CSV and voice-alarm phrase text.

mod csv;
mod phrase;

pub use self::csv::{generate_csv, output_file_name, write_sheet_csvs, UTF8_BOM};
pub use phrase::{generate_phrase_text, write_phrase_file};
