//! Configuration constants and reference tables for the converter.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::model::{FormatVariant, SignalType};

/// Default station/device address prefix for hardwired points.
pub const DEFAULT_STATION_PREFIX: &str = "1.1.11.3";

/// Node alias written to every record.
pub const DEFAULT_NODE_ALIAS: &str = "COM1";

/// Font colour (RGB, last six hex digits) marking rows for phrase export.
pub const HIGHLIGHT_RGB: &str = "FF0000";

/// Suffix appended to descriptions to form audio file names.
pub const AUDIO_SUFFIX: &str = ".wav";

/// Identifier prefix used when no signal type prefix is configured.
pub const FALLBACK_TAG_PREFIX: &str = "KGZ_PT";

/// Zero-padding width of the numeric part of synthetic identifiers.
pub const TAG_INDEX_WIDTH: usize = 3;

/// Condition tested by one format-detection rule against a column profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectionCondition {
    /// At least `count` columns normalize to `label`.
    LabelCount { label: String, count: usize },
    /// Some normalized label contains `fragment`.
    LabelFragment { fragment: String },
    /// A column normalizes to `label`.
    Label { label: String },
}

/// Ordered detection rule: the first rule whose condition holds decides the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionRule {
    pub condition: DetectionCondition,
    pub variant: FormatVariant,
}

impl DetectionRule {
    fn new(condition: DetectionCondition, variant: FormatVariant) -> Self {
        Self { condition, variant }
    }
}

/// Ordered sheet-name token rule for signal type resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRule {
    pub token: String,
    pub signal_type: SignalType,
}

/// Identifier prefix for one signal type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypePrefix {
    pub signal_type: SignalType,
    pub prefix: String,
}

/// Dual-block splitter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Detect block boundaries from blank spacer columns before falling back to fixed offsets.
    pub detect_boundaries: bool,
    /// Label that opens every block; repeated occurrences mark block starts.
    pub sequence_label: String,
    /// Fallback block width in columns.
    pub block_width: usize,
    /// Fallback spacer width in columns.
    pub spacer_width: usize,
    /// Labels accepted as the name column inside a block, in priority order.
    pub name_labels: Vec<String>,
    /// Name column offset inside a block when no label matches.
    pub name_offset: usize,
    /// Label fragment identifying the register address column inside a block.
    pub address_fragment: String,
    /// Address column offset inside a block when no label matches.
    pub address_offset: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            detect_boundaries: true,
            sequence_label: "序号".to_string(),
            block_width: 5,
            spacer_width: 1,
            name_labels: strings(&["Name", "名称", "点名", "描述"]),
            name_offset: 1,
            address_fragment: "地址".to_string(),
            address_offset: 4,
        }
    }
}

/// Column names and markers used by the voice-alarm phrase export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseConfig {
    pub sequence_column: String,
    pub description_column: String,
    pub name_column: String,
    /// Optional per-row prefix column; empty text when absent.
    pub prefix_column: String,
    pub highlight_rgb: String,
    pub audio_suffix: String,
}

impl Default for PhraseConfig {
    fn default() -> Self {
        Self {
            sequence_column: "序号".to_string(),
            description_column: "描述".to_string(),
            name_column: "名称".to_string(),
            prefix_column: "前缀".to_string(),
            highlight_rgb: HIGHLIGHT_RGB.to_string(),
            audio_suffix: AUDIO_SUFFIX.to_string(),
        }
    }
}

/// Immutable reference tables for normalization, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Sheet-name keywords marking administrative (non-data) sheets.
    pub admin_keywords: Vec<String>,
    /// Name-field substrings marking spare/placeholder rows.
    pub exclusion_tokens: Vec<String>,
    /// Grouping columns reconstructed by fill-forward.
    pub fill_columns: Vec<String>,
    pub detection_rules: Vec<DetectionRule>,
    pub signal_rules: Vec<SignalRule>,
    pub type_prefixes: Vec<TypePrefix>,
    /// Identifier prefix for parallel register-map points.
    pub plc_prefix: String,
    pub node_alias: String,
    /// Name column of hardwired I/O lists.
    pub hardwired_name_column: String,
    /// Description column of logic/alarm mapping tables.
    pub logic_name_column: String,
    /// Label for the 1->0 transition of discrete signals.
    pub falling_label: String,
    /// Label for the 0->1 transition of discrete signals.
    pub rising_label: String,
    pub split: SplitConfig,
    pub phrase: PhraseConfig,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        use DetectionCondition::{Label, LabelCount, LabelFragment};
        use FormatVariant::{HardwiredIO, LogicAlarmMap, ParallelRegisterBlock};

        let detection_rules = vec![
            DetectionRule::new(
                LabelCount {
                    label: "序号".to_string(),
                    count: 2,
                },
                ParallelRegisterBlock,
            ),
            DetectionRule::new(
                LabelFragment {
                    fragment: "寄存器地址".to_string(),
                },
                ParallelRegisterBlock,
            ),
            DetectionRule::new(
                Label {
                    label: "模块号".to_string(),
                },
                HardwiredIO,
            ),
            DetectionRule::new(
                Label {
                    label: "本侧盘柜".to_string(),
                },
                HardwiredIO,
            ),
            DetectionRule::new(
                Label {
                    label: "描述".to_string(),
                },
                LogicAlarmMap,
            ),
            DetectionRule::new(
                Label {
                    label: "点名".to_string(),
                },
                HardwiredIO,
            ),
        ];

        let signal_rules = [
            ("DI", SignalType::DiscreteInput),
            ("SOE", SignalType::SequenceOfEvents),
            ("DO", SignalType::DiscreteOutput),
            ("AI", SignalType::AnalogInput),
            ("RTD", SignalType::Temperature),
        ]
        .into_iter()
        .map(|(token, signal_type)| SignalRule {
            token: token.to_string(),
            signal_type,
        })
        .collect();

        let type_prefixes = [
            (SignalType::DiscreteInput, "KGZ_DIN"),
            (SignalType::SequenceOfEvents, "KGZ_SOE"),
            (SignalType::DiscreteOutput, "KGZ_DON"),
            (SignalType::AnalogInput, "KGZ_AIN"),
            (SignalType::Temperature, "KGZ_RTD"),
            (SignalType::Virtual, "VIRT_PT_"),
        ]
        .into_iter()
        .map(|(signal_type, prefix)| TypePrefix {
            signal_type,
            prefix: prefix.to_string(),
        })
        .collect();

        Self {
            admin_keywords: strings(&["说明", "时钟", "网络", "串口", "目录"]),
            exclusion_tokens: strings(&["备用", "预留", "/", "#NAME"]),
            fill_columns: strings(&["本侧盘柜", "模块号"]),
            detection_rules,
            signal_rules,
            type_prefixes,
            plc_prefix: "PLC_PT_".to_string(),
            node_alias: DEFAULT_NODE_ALIAS.to_string(),
            hardwired_name_column: "点名".to_string(),
            logic_name_column: "描述".to_string(),
            falling_label: "复归".to_string(),
            rising_label: "动作".to_string(),
            split: SplitConfig::default(),
            phrase: PhraseConfig::default(),
        }
    }
}

impl NormalizeConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConvertError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Check internal consistency of the tables.
    pub fn check(&self) -> Result<()> {
        if self.split.block_width == 0 {
            return Err(ConvertError::InvalidConfig {
                message: "split.block_width must be at least 1".to_string(),
            });
        }
        if self.split.name_offset >= self.split.block_width {
            return Err(ConvertError::InvalidConfig {
                message: format!(
                    "split.name_offset {} is outside a block of width {}",
                    self.split.name_offset, self.split.block_width
                ),
            });
        }
        if self.exclusion_tokens.iter().any(String::is_empty) {
            return Err(ConvertError::InvalidConfig {
                message: "exclusion_tokens must not contain empty strings".to_string(),
            });
        }
        Ok(())
    }

    /// Identifier prefix for a signal type.
    pub fn type_prefix(&self, signal_type: SignalType) -> &str {
        self.type_prefixes
            .iter()
            .find(|p| p.signal_type == signal_type)
            .map_or(FALLBACK_TAG_PREFIX, |p| p.prefix.as_str())
    }

    /// First administrative keyword contained in a sheet name.
    pub fn admin_keyword(&self, sheet_name: &str) -> Option<&str> {
        self.admin_keywords
            .iter()
            .find(|kw| !kw.is_empty() && sheet_name.contains(kw.as_str()))
            .map(String::as_str)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
