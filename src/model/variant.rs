//! Layout variants and signal categories.

use serde::{Deserialize, Serialize};

/// Structural layout of a point-list sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatVariant {
    /// Hardwired I/O list with merged cabinet/module grouping columns.
    HardwiredIO,
    /// PLC register map holding two or more record blocks side by side.
    ParallelRegisterBlock,
    /// Logic/alarm mapping table of virtual points.
    LogicAlarmMap,
    /// None of the known layouts matched.
    Unrecognized,
}

impl FormatVariant {
    /// Whether records can be built for this variant.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, FormatVariant::Unrecognized)
    }
}

impl std::fmt::Display for FormatVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatVariant::HardwiredIO => write!(f, "hardwired I/O list"),
            FormatVariant::ParallelRegisterBlock => write!(f, "parallel PLC register map"),
            FormatVariant::LogicAlarmMap => write!(f, "logic/alarm mapping table"),
            FormatVariant::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Signal category of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignalType {
    #[default]
    DiscreteInput,
    DiscreteOutput,
    SequenceOfEvents,
    AnalogInput,
    Temperature,
    Virtual,
}

impl SignalType {
    /// Discrete-like signals carry a reset/action transition label pair.
    pub fn is_discrete(&self) -> bool {
        matches!(
            self,
            SignalType::DiscreteInput | SignalType::DiscreteOutput | SignalType::SequenceOfEvents
        )
    }

    /// Short code used in logs and sheet names.
    pub fn code(&self) -> &'static str {
        match self {
            SignalType::DiscreteInput => "DI",
            SignalType::DiscreteOutput => "DO",
            SignalType::SequenceOfEvents => "SOE",
            SignalType::AnalogInput => "AI",
            SignalType::Temperature => "RTD",
            SignalType::Virtual => "VIRT",
        }
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
