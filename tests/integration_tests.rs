//! Integration tests for point-list normalization and phrase export.
//!
//! Fixtures are real `.xlsx` workbooks written with rust_xlsxwriter into a
//! temporary directory, so the calamine value reader and the font-colour
//! reader are exercised together with the normalization pipeline.

use pointlist_convert_rs::{
    collect_phrases, convert_workbook_file, generate_phrase_text, load_rules, read_workbook,
    validate_results, write_sheet_csvs, ConvertError, FormatVariant, NormalizeConfig,
    PhraseConfig, PhraseEntry, SkipReason,
};
use pretty_assertions::assert_eq;
use rust_xlsxwriter::{Color, Format, Workbook as XlsxWorkbook, Worksheet};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ==================== Fixture Builders ====================

/// One cell of a fixture sheet.
enum Value<'a> {
    Text(&'a str),
    Red(&'a str),
    Number(f64),
    Blank,
}

fn write_rows(sheet: &mut Worksheet, rows: &[Vec<Value>]) {
    let red = Format::new().set_font_color(Color::Red);
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            let (r, c) = (r as u32, c as u16);
            match value {
                Value::Text(s) => {
                    sheet.write_string(r, c, *s).unwrap();
                }
                Value::Red(s) => {
                    sheet.write_string_with_format(r, c, *s, &red).unwrap();
                }
                Value::Number(n) => {
                    sheet.write_number(r, c, *n).unwrap();
                }
                Value::Blank => {}
            }
        }
    }
}

fn save_workbook(dir: &TempDir, file_name: &str, sheets: Vec<(&str, Vec<Vec<Value>>)>) -> PathBuf {
    let mut workbook = XlsxWorkbook::new();
    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name).unwrap();
        write_rows(sheet, &rows);
    }
    let path = dir.path().join(file_name);
    workbook.save(&path).unwrap();
    path
}

fn point_list(dir: &TempDir) -> PathBuf {
    use Value::{Blank, Number as N, Text as T};
    save_workbook(
        dir,
        "points.xlsx",
        vec![
            ("说明", vec![vec![T("序号"), T("点名")], vec![N(1.0), T("不应输出")]]),
            (
                "DI_Cabinet1",
                vec![
                    vec![T("本侧盘柜"), T("模块号"), T("点名")],
                    vec![T("1P"), T("M1"), T("断路器1分闸")],
                    vec![Blank, Blank, T("备用")],
                    vec![Blank, T("M2"), T("断路器2分闸")],
                ],
            ),
            (
                "PLC通讯",
                vec![
                    vec![
                        T("序号"), T("Name"), T("类型"), T("说明"), T("寄存器地址"), Blank,
                        T("序号"), T("Name"), T("类型"), T("说明"), T("寄存器地址"),
                    ],
                    vec![
                        N(1.0), T("泵1运行"), T("BOOL"), Blank, N(40001.0), Blank,
                        N(1.0), T("阀1开"), T("BOOL"), Blank, N(40101.0),
                    ],
                    vec![
                        N(2.0), T("预留"), T("BOOL"), Blank, N(40002.0), Blank,
                        N(2.0), T("阀2开"), T("BOOL"), Blank, N(40102.0),
                    ],
                ],
            ),
            (
                "逻辑报警",
                vec![vec![T("序号"), T("描述")], vec![N(1.0), T("主变重瓦斯动作")]],
            ),
            ("杂项", vec![vec![T("编号"), T("备注")], vec![N(1.0), T("x")]]),
        ],
    )
}

fn phrase_workbook(dir: &TempDir, file_name: &str, rows: Vec<Vec<Value>>) -> PathBuf {
    save_workbook(dir, file_name, vec![("Sheet1", rows)])
}

// ==================== Output Helpers ====================

/// A generated canonical CSV file split into header and rows.
struct CsvOutput {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvOutput {
    fn read(path: &Path) -> Self {
        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(b"\xEF\xBB\xBF"), "missing BOM in {}", path.display());

        let mut reader = csv::Reader::from_reader(&bytes[3..]);
        let headers = reader.headers().unwrap().iter().map(String::from).collect();
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        CsvOutput { headers, rows }
    }

    fn column(&self, header: &str) -> Vec<&str> {
        let idx = self
            .headers
            .iter()
            .position(|h| h == header)
            .unwrap_or_else(|| panic!("no column {}", header));
        self.rows.iter().map(|r| r[idx].as_str()).collect()
    }
}

// ==================== Workbook Conversion Tests ====================

#[test]
fn test_read_workbook_sheet_order_and_values() {
    let dir = TempDir::new().unwrap();
    let workbook = read_workbook(&point_list(&dir)).unwrap();

    assert_eq!(
        workbook.sheet_names(),
        vec!["说明", "DI_Cabinet1", "PLC通讯", "逻辑报警", "杂项"]
    );
    let plc = workbook.sheet("PLC通讯").unwrap();
    assert_eq!(plc.columns.len(), 11);
    assert_eq!(plc.columns[5], "");
    assert_eq!(plc.rows[0].value(4), Some("40001"));
}

#[test]
fn test_convert_workbook_outcomes() {
    let dir = TempDir::new().unwrap();
    let results =
        convert_workbook_file(&point_list(&dir), &NormalizeConfig::default(), "1.1.11.3").unwrap();

    assert_eq!(results.len(), 5);
    assert!(matches!(
        results[0].skip_reason(),
        Some(SkipReason::Administrative { .. })
    ));
    assert_eq!(results[1].variant(), Some(FormatVariant::HardwiredIO));
    assert_eq!(results[2].variant(), Some(FormatVariant::ParallelRegisterBlock));
    assert_eq!(results[3].variant(), Some(FormatVariant::LogicAlarmMap));
    assert!(matches!(
        results[4].skip_reason(),
        Some(SkipReason::Unrecognized { .. })
    ));

    let hardwired: Vec<(&str, &str)> = results[1]
        .records()
        .iter()
        .map(|r| (r.tag(), r.address()))
        .collect();
    assert_eq!(
        hardwired,
        vec![("KGZ_DIN000", "1.1.11.3.0"), ("KGZ_DIN001", "1.1.11.3.1")]
    );

    let plc: Vec<(&str, &str)> = results[2]
        .records()
        .iter()
        .map(|r| (r.description(), r.address()))
        .collect();
    assert_eq!(
        plc,
        vec![("泵1运行", "40001"), ("阀1开", "40101"), ("阀2开", "40102")]
    );

    let validation = validate_results(&results);
    assert!(validation.passed, "{:?}", validation.errors);
}

#[test]
fn test_write_csv_files() {
    let dir = TempDir::new().unwrap();
    let results =
        convert_workbook_file(&point_list(&dir), &NormalizeConfig::default(), "1.1.11.3").unwrap();

    let out = dir.path().join("out");
    let written = write_sheet_csvs(&out, &results).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "数据库模板_DI_Cabinet1.csv",
            "数据库模板_PLC通讯.csv",
            "数据库模板_逻辑报警.csv"
        ]
    );

    let di = CsvOutput::read(&written[0]);
    assert_eq!(di.headers.len(), 48);
    assert_eq!(di.column("描述"), vec!["断路器1分闸", "断路器2分闸"]);
    assert_eq!(di.column("ACC测点名"), vec!["KGZ_DIN000", "KGZ_DIN001"]);
    assert_eq!(di.column("序号"), vec!["0", "1"]);
    assert_eq!(di.column("点号"), vec!["0.0", "1.0"]);
    assert_eq!(di.column("节点别名"), vec!["COM1", "COM1"]);
    assert_eq!(di.column("入历史库"), vec!["true", "true"]);
    assert_eq!(di.column("取反"), vec!["false", "false"]);
    assert_eq!(di.column("1->0描述"), vec!["复归", "复归"]);
    assert_eq!(di.column("镜头号"), vec!["0.0", "0.0"]);

    let logic = CsvOutput::read(&written[2]);
    assert_eq!(logic.column("ACC测点名"), vec!["VIRT_PT_000"]);
    assert_eq!(logic.column("实际测点地址"), vec!["0"]);
    assert_eq!(logic.column("虚拟点"), vec!["true"]);
}

#[test]
fn test_convert_missing_file() {
    let result = convert_workbook_file(
        Path::new("/nonexistent/points.xlsx"),
        &NormalizeConfig::default(),
        "1.1.11.3",
    );
    assert!(matches!(result, Err(ConvertError::FileNotFound { .. })));
}

// ==================== Phrase Export Tests ====================

#[test]
fn test_font_colors_reach_cells() {
    use Value::{Number as N, Red, Text as T};
    let dir = TempDir::new().unwrap();
    let path = phrase_workbook(
        &dir,
        "voice.xlsx",
        vec![
            vec![T("序号"), T("描述"), T("名称")],
            vec![N(1.0), T("A001"), Red("断路器分闸")],
            vec![N(2.0), T("A002"), T("断路器合闸")],
        ],
    );

    let workbook = read_workbook(&path).unwrap();
    let sheet = &workbook.sheets[0];
    assert!(sheet.rows[0].cells[2].has_font_rgb("FF0000"));
    assert!(!sheet.rows[1].cells[2].has_font_rgb("FF0000"));
}

#[test]
fn test_collect_phrases_across_workbooks() {
    use Value::{Number as N, Red, Text as T};
    let dir = TempDir::new().unwrap();

    let first = phrase_workbook(
        &dir,
        "unit1.xlsx",
        vec![
            vec![T("序号"), T("描述"), T("名称"), T("前缀")],
            vec![N(1.0), T("A001"), Red("旧名分闸"), T("1号机")],
            vec![N(2.0), T("A002"), T("旧名合闸"), T("1号机")],
            vec![N(3.0), T("A003"), Red("旧名合闸"), T("1号机")],
        ],
    );
    let missing_column = phrase_workbook(
        &dir,
        "broken.xlsx",
        vec![vec![T("序号"), T("名称")], vec![N(1.0), Red("x")]],
    );
    let second = phrase_workbook(
        &dir,
        "unit2.xlsx",
        vec![
            vec![T("序号"), T("描述"), T("名称")],
            vec![N(9.0), T("B009"), Red("主变重瓦斯")],
        ],
    );

    let rules_path = dir.path().join("rules.txt");
    std::fs::write(&rules_path, "# 语音规则\n旧名=新名\n\n叶巴滩1号机=一号机组\n").unwrap();
    let rules = load_rules(&rules_path).unwrap();

    let inputs = vec![
        first,
        missing_column,
        second,
        dir.path().join("absent.xlsx"),
    ];
    let entries = collect_phrases(&inputs, &rules, "叶巴滩", &PhraseConfig::default());

    assert_eq!(
        entries,
        vec![
            PhraseEntry {
                sequence: "1".into(),
                phrase: "一号机组新名分闸".into(),
                audio_file: "A001.wav".into(),
            },
            PhraseEntry {
                sequence: "3".into(),
                phrase: "一号机组新名合闸".into(),
                audio_file: "A003.wav".into(),
            },
            PhraseEntry {
                sequence: "9".into(),
                phrase: "叶巴滩主变重瓦斯".into(),
                audio_file: "B009.wav".into(),
            },
        ]
    );

    assert_eq!(
        generate_phrase_text(&entries),
        "1 一号机组新名分闸 A001.wav\n3 一号机组新名合闸 A003.wav\n9 叶巴滩主变重瓦斯 B009.wav\n"
    );
}

#[test]
fn test_substitution_chain_from_rule_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.txt");

    std::fs::write(&path, "旧名=新名\n").unwrap();
    assert_eq!(load_rules(&path).unwrap().apply("前缀旧名"), "前缀新名");

    std::fs::write(&path, "旧名=新名\n前缀=PFX\n").unwrap();
    assert_eq!(load_rules(&path).unwrap().apply("前缀旧名"), "PFX新名");
}
