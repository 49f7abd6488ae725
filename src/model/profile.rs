//! Whitespace-insensitive column profile used for fuzzy header matching.

use serde::Serialize;
use std::collections::BTreeMap;

/// Normalize a raw column label: drop every whitespace character, embedded
/// newlines included, and any byte-order mark.
pub fn normalize_label(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{feff}')
        .collect()
}

/// Mapping from normalized column label to the positions and original labels
/// that share it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnProfile {
    /// Normalized label per column position.
    normalized: Vec<String>,
    /// Original label per column position.
    originals: Vec<String>,
    /// Normalized label -> column positions in source order.
    index: BTreeMap<String, Vec<usize>>,
}

impl ColumnProfile {
    /// Profile a sequence of raw column labels.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut profile = Self::default();
        for (pos, label) in labels.iter().enumerate() {
            let original = label.as_ref().to_string();
            let key = normalize_label(&original);
            profile.index.entry(key.clone()).or_default().push(pos);
            profile.normalized.push(key);
            profile.originals.push(original);
        }
        profile
    }

    /// Number of profiled columns.
    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    /// Check if no columns were profiled.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Number of columns whose normalized label equals `label` (after normalizing it too).
    pub fn count(&self, label: &str) -> usize {
        self.index
            .get(&normalize_label(label))
            .map_or(0, |positions| positions.len())
    }

    /// Check if a column with this label exists.
    pub fn contains(&self, label: &str) -> bool {
        self.count(label) > 0
    }

    /// Check if any normalized label contains `fragment` as a substring.
    pub fn any_contains(&self, fragment: &str) -> bool {
        let fragment = normalize_label(fragment);
        self.normalized.iter().any(|l| l.contains(&fragment))
    }

    /// Position of the first column with this label.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.index
            .get(&normalize_label(label))
            .and_then(|positions| positions.first().copied())
    }

    /// All positions of columns with this label.
    pub fn positions(&self, label: &str) -> &[usize] {
        self.index
            .get(&normalize_label(label))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Original labels that normalize to `label`.
    pub fn originals(&self, label: &str) -> Vec<&str> {
        self.positions(label)
            .iter()
            .map(|&p| self.originals[p].as_str())
            .collect()
    }

    /// Normalized labels in column order, blanks omitted.
    pub fn normalized_labels(&self) -> Vec<&str> {
        self.normalized
            .iter()
            .filter(|l| !l.is_empty())
            .map(String::as_str)
            .collect()
    }

    /// Normalized label at a column position.
    pub fn label_at(&self, position: usize) -> Option<&str> {
        self.normalized.get(position).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label_strips_whitespace() {
        assert_eq!(normalize_label(" 本侧\n盘柜 "), "本侧盘柜");
        assert_eq!(normalize_label("寄存器 地址\t"), "寄存器地址");
        assert_eq!(normalize_label("\u{feff}序号"), "序号");
    }

    #[test]
    fn test_normalize_label_idempotent() {
        for raw in ["  a b\nc ", "序 号", "", "\r\n"] {
            let once = normalize_label(raw);
            assert_eq!(normalize_label(&once), once);
        }
    }

    #[test]
    fn test_profile_duplicates() {
        let profile = ColumnProfile::from_labels(&["序号", "Name", " 序 号", "Name2"]);
        assert_eq!(profile.count("序号"), 2);
        assert_eq!(profile.positions("序号"), &[0, 2]);
        assert_eq!(profile.originals("序号"), vec!["序号", " 序 号"]);
        assert_eq!(profile.position("Name2"), Some(3));
    }

    #[test]
    fn test_profile_empty_labels() {
        let profile = ColumnProfile::from_labels(&["", " ", "a"]);
        assert_eq!(profile.len(), 3);
        assert_eq!(profile.count(""), 2);
        assert_eq!(profile.normalized_labels(), vec!["a"]);
    }

    #[test]
    fn test_any_contains() {
        let profile = ColumnProfile::from_labels(&["modbus上送\n寄存器地址"]);
        assert!(profile.any_contains("寄存器地址"));
        assert!(!profile.any_contains("模块号"));
    }
}
