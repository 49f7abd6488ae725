//! Signal type resolution from sheet names.

use crate::config::NormalizeConfig;
use crate::model::{FormatVariant, SignalType};

/// Resolve the signal category of a sheet.
///
/// Logic/alarm mapping tables are always virtual. Other layouts take the
/// first configured token found in the upper-cased sheet name, defaulting to
/// discrete input.
pub fn resolve_signal_type(
    sheet_name: &str,
    variant: FormatVariant,
    config: &NormalizeConfig,
) -> SignalType {
    if variant == FormatVariant::LogicAlarmMap {
        return SignalType::Virtual;
    }

    let upper = sheet_name.to_uppercase();
    config
        .signal_rules
        .iter()
        .find(|rule| !rule.token.is_empty() && upper.contains(&rule.token.to_uppercase()))
        .map_or(SignalType::default(), |rule| rule.signal_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(name: &str) -> SignalType {
        resolve_signal_type(name, FormatVariant::HardwiredIO, &NormalizeConfig::default())
    }

    #[test]
    fn test_tokens() {
        assert_eq!(resolve("DI_Cabinet1"), SignalType::DiscreteInput);
        assert_eq!(resolve("SOE量"), SignalType::SequenceOfEvents);
        assert_eq!(resolve("DO输出"), SignalType::DiscreteOutput);
        assert_eq!(resolve("AI模拟量"), SignalType::AnalogInput);
        assert_eq!(resolve("RTD温度"), SignalType::Temperature);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(resolve("lcu_do"), SignalType::DiscreteOutput);
        assert_eq!(resolve("rtd"), SignalType::Temperature);
    }

    #[test]
    fn test_table_order_decides() {
        // "DI" is checked before "SOE" and "DO"
        assert_eq!(resolve("SOE_DI"), SignalType::DiscreteInput);
        assert_eq!(resolve("DO_AI"), SignalType::DiscreteOutput);
    }

    #[test]
    fn test_default_discrete_input() {
        assert_eq!(resolve("开关量"), SignalType::DiscreteInput);
    }

    #[test]
    fn test_logic_map_always_virtual() {
        let config = NormalizeConfig::default();
        assert_eq!(
            resolve_signal_type("AI", FormatVariant::LogicAlarmMap, &config),
            SignalType::Virtual
        );
    }
}
