//! The fixed 48-field canonical record consumed by the alarm database importer.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

macro_rules! canonical_fields {
    ($($variant:ident => ($header:literal, $key:literal)),+ $(,)?) => {
        /// One field of the canonical schema, in output order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum CanonicalField {
            $($variant),+
        }

        impl CanonicalField {
            /// All fields in output order.
            pub const ALL: [CanonicalField; FIELD_COUNT] = [$(CanonicalField::$variant),+];

            /// Column header expected by the importer.
            pub fn header(&self) -> &'static str {
                match self {
                    $(CanonicalField::$variant => $header),+
                }
            }

            /// Stable snake_case key used in JSON output.
            pub fn key(&self) -> &'static str {
                match self {
                    $(CanonicalField::$variant => $key),+
                }
            }
        }
    };
}

/// Number of fields in the canonical schema.
pub const FIELD_COUNT: usize = 48;

canonical_fields! {
    PhysicalAddress => ("实际测点地址", "physical_address"),
    Description => ("描述", "description"),
    PointId => ("点号", "point_id"),
    NodeAlias => ("节点别名", "node_alias"),
    Inverted => ("取反", "inverted"),
    EventStart => ("事件启动", "event_start"),
    RemoteControl => ("远动", "remote_control"),
    DualNode => ("双节点", "dual_node"),
    DualNodeName => ("双节点名", "dual_node_name"),
    MeasuredValue => ("测值", "measured_value"),
    Input => ("输入", "input"),
    Virtual => ("虚拟点", "is_virtual"),
    Maintenance => ("检修", "maintenance"),
    Manual => ("手动", "manual"),
    Quality => ("品质", "quality"),
    Historian => ("入历史库", "historian"),
    VoiceAlarm => ("语音报警", "voice_alarm"),
    RawValue => ("生值", "raw_value"),
    InvertedValue => ("反值", "inverted_value"),
    InputMeasuredValue => ("开入实测值", "input_measured_value"),
    RecallTrigger => ("事故追忆启动源", "recall_trigger"),
    RemoteEnable => ("远动投退", "remote_enable"),
    RemoteMeasuredValue => ("远动测值", "remote_measured_value"),
    EventHandling => ("事件处理方式", "event_handling"),
    SyntheticTag => ("ACC测点名", "synthetic_tag"),
    InternalPointId => ("内部点号", "internal_point_id"),
    DriverPointId => ("驱动内部点号", "driver_point_id"),
    SequenceIndex => ("序号", "sequence_index"),
    BoardNumber => ("板号", "board_number"),
    DriverName => ("驱动名称", "driver_name"),
    DeviceType => ("设备类型", "device_type"),
    Overview => ("一览表", "overview"),
    FallingDescription => ("1->0描述", "falling_description"),
    RisingDescription => ("0->1描述", "rising_description"),
    RisingAlarm => ("0->1报警", "rising_alarm"),
    RisingLog => ("0->1登录", "rising_log"),
    RisingPage => ("0->1寻呼", "rising_page"),
    FallingAlarm => ("1->0报警", "falling_alarm"),
    FallingLog => ("1->0登录", "falling_log"),
    FallingPage => ("1->0寻呼", "falling_page"),
    HostAlarm => ("上位机报警", "host_alarm"),
    RisingVoiceId => ("0->1语音号", "rising_voice_id"),
    FallingVoiceId => ("1->0语音号", "falling_voice_id"),
    CameraId => ("镜头号", "camera_id"),
    Alarm => ("报警", "alarm"),
    PhoneVoiceId => ("电话语音号", "phone_voice_id"),
    PhoneAlarm => ("电话报警", "phone_alarm"),
    Masked => ("屏蔽", "masked"),
}

impl CanonicalField {
    /// Position of this field in output order.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Column headers in output order.
    pub fn headers() -> [&'static str; FIELD_COUNT] {
        Self::ALL.map(|f| f.header())
    }
}

/// Value of one canonical field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(u64),
    Number(f64),
    Flag(bool),
}

impl Default for FieldValue {
    /// The numeric zero every underived field falls back to.
    fn default() -> Self {
        FieldValue::Number(0.0)
    }
}

impl FieldValue {
    /// Get the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the flag, if this is a boolean value.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            // Decimals keep at least one fractional digit: 0.0, 3.0, 2.5
            FieldValue::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{:.1}", n),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Integer(n) => serializer.serialize_u64(*n),
            FieldValue::Number(n) => serializer.serialize_f64(*n),
            FieldValue::Flag(b) => serializer.serialize_bool(*b),
        }
    }
}

/// One canonical point record. Every field always holds a value.
///
/// Records are produced by [`crate::transform::build_records`] and are not
/// modified afterwards; only read accessors are public.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    values: [FieldValue; FIELD_COUNT],
}

impl Default for CanonicalRecord {
    fn default() -> Self {
        Self {
            values: std::array::from_fn(|_| FieldValue::default()),
        }
    }
}

impl CanonicalRecord {
    pub(crate) fn set(&mut self, field: CanonicalField, value: FieldValue) {
        self.values[field.index()] = value;
    }

    /// Get the value of a field.
    pub fn get(&self, field: CanonicalField) -> &FieldValue {
        &self.values[field.index()]
    }

    /// All values in output order.
    pub fn values(&self) -> &[FieldValue; FIELD_COUNT] {
        &self.values
    }

    /// Values formatted for delimited output, in output order.
    pub fn to_row(&self) -> Vec<String> {
        self.values.iter().map(|v| v.to_string()).collect()
    }

    /// Point description.
    pub fn description(&self) -> &str {
        self.get(CanonicalField::Description)
            .as_text()
            .unwrap_or_default()
    }

    /// Synthetic identifier (prefix + zero-padded index).
    pub fn tag(&self) -> &str {
        self.get(CanonicalField::SyntheticTag)
            .as_text()
            .unwrap_or_default()
    }

    /// Physical address.
    pub fn address(&self) -> &str {
        self.get(CanonicalField::PhysicalAddress)
            .as_text()
            .unwrap_or_default()
    }

    /// 0-based position within the sheet's output.
    pub fn sequence_index(&self) -> u64 {
        match self.get(CanonicalField::SequenceIndex) {
            FieldValue::Integer(n) => *n,
            _ => 0,
        }
    }

    /// Whether the point is virtual.
    pub fn is_virtual(&self) -> bool {
        self.get(CanonicalField::Virtual)
            .as_flag()
            .unwrap_or(false)
    }
}

impl Serialize for CanonicalRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for field in CanonicalField::ALL {
            map.serialize_entry(field.key(), self.get(field))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_table_complete() {
        assert_eq!(CanonicalField::ALL.len(), 48);
        for (i, field) in CanonicalField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
        assert_eq!(CanonicalField::headers()[0], "实际测点地址");
        assert_eq!(CanonicalField::headers()[47], "屏蔽");
    }

    #[test]
    fn test_headers_unique() {
        let headers = CanonicalField::headers();
        let set: std::collections::HashSet<_> = headers.iter().collect();
        assert_eq!(set.len(), FIELD_COUNT);
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::default().to_string(), "0.0");
        assert_eq!(FieldValue::Number(3.0).to_string(), "3.0");
        assert_eq!(FieldValue::Number(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::Integer(7).to_string(), "7");
        assert_eq!(FieldValue::Flag(true).to_string(), "true");
        assert_eq!(FieldValue::Text("COM1".into()).to_string(), "COM1");
    }

    #[test]
    fn test_default_record_is_all_zero() {
        let record = CanonicalRecord::default();
        assert!(record.to_row().iter().all(|v| v == "0.0"));
        assert_eq!(record.description(), "");
        assert_eq!(record.sequence_index(), 0);
    }

    #[test]
    fn test_record_serializes_in_field_order() {
        let mut record = CanonicalRecord::default();
        record.set(CanonicalField::Description, FieldValue::Text("泵启动".into()));
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(json.starts_with("{\"physical_address\":0.0,\"description\":\"泵启动\""));
    }
}
