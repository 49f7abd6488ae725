//! Sheet transformations: fill-forward, row filtering, dual-block splitting,
//! record building, rule substitution and phrase generation.

mod build;
mod fill;
mod filter;
mod phrase;
mod split;
mod substitute;

pub use build::{build_records, register_address, synthetic_tag, AddressSource, RecordPlan};
pub use fill::fill_forward;
pub use filter::{filter_rows, is_excluded};
pub use phrase::{generate_phrases, mark_highlighted, PhraseColumns};
pub use split::{detect_blocks, fixed_blocks, split_blocks, SplitSheet};
pub use substitute::{RuleSet, SubstitutionRule};
