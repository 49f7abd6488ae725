//! Font-colour extraction from the xlsx package.
//!
//! calamine exposes cell values only, so highlight colours are read directly
//! from the OOXML parts: `xl/workbook.xml` and its relationships locate each
//! sheet part, `xl/styles.xml` maps cell style indices to fonts, and the sheet
//! parts give each cell's style index.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader as XmlReader;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{ConvertError, Result};

/// Font colour per cell, keyed by 0-based (row, column).
pub type FontColorMap = HashMap<(u32, u32), String>;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const STYLES_PART: &str = "xl/styles.xml";

/// Read the explicit RGB font colour of every styled cell, per sheet name.
pub fn read_font_colors(path: &Path) -> Result<HashMap<String, FontColorMap>> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| ConvertError::Archive {
        part: path.display().to_string(),
        message: e.to_string(),
    })?;

    let Some(styles_xml) = read_optional_part(&mut archive, STYLES_PART)? else {
        debug!("No styles part; no font colours available");
        return Ok(HashMap::new());
    };
    let palette = style_font_colors(&styles_xml)?;
    if palette.iter().all(Option::is_none) {
        return Ok(HashMap::new());
    }

    let workbook_xml = read_part(&mut archive, WORKBOOK_PART)?;
    let rels_xml = read_part(&mut archive, WORKBOOK_RELS_PART)?;
    let targets = relationship_targets(&rels_xml)?;

    let mut colors = HashMap::new();
    for (name, rel_id) in sheet_relationships(&workbook_xml)? {
        let Some(part) = targets.get(&rel_id) else {
            debug!("Sheet '{}': relationship {} not found", name, rel_id);
            continue;
        };
        let sheet_xml = read_part(&mut archive, part)?;
        let styles = cell_style_indices(&sheet_xml, part)?;

        let map: FontColorMap = styles
            .into_iter()
            .filter_map(|(pos, style)| {
                palette
                    .get(style)
                    .and_then(|color| color.clone())
                    .map(|color| (pos, color))
            })
            .collect();
        debug!("Sheet '{}': {} coloured cells", name, map.len());
        colors.insert(name, map);
    }

    Ok(colors)
}

/// Convert an A1-style reference to 0-based (row, column): `D5` -> `(4, 3)`.
pub fn parse_cell_ref(reference: &str) -> Result<(u32, u32)> {
    let invalid = || ConvertError::InvalidCellReference {
        reference: reference.to_string(),
    };

    let cleaned: String = reference.chars().filter(|c| *c != '$').collect();
    let split = cleaned
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (letters, digits) = cleaned.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }

    let mut column: u32 = 0;
    for c in letters.chars() {
        let value = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        column = column
            .checked_mul(26)
            .and_then(|n| n.checked_add(value))
            .ok_or_else(invalid)?;
    }
    let row: u32 = digits.parse().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }

    Ok((row - 1, column - 1))
}

/// Font colour for each cell style (`cellXfs` entry), by style index.
pub fn style_font_colors(styles_xml: &str) -> Result<Vec<Option<String>>> {
    let mut fonts: Vec<Option<String>> = Vec::new();
    let mut xf_fonts: Vec<usize> = Vec::new();

    let mut in_fonts = false;
    let mut in_cell_xfs = false;
    let mut current_font: Option<Option<String>> = None;

    let mut reader = XmlReader::from_str(styles_xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"fonts" => in_fonts = true,
                b"font" if in_fonts => current_font = Some(None),
                b"cellXfs" => in_cell_xfs = true,
                b"xf" if in_cell_xfs => xf_fonts.push(font_id(&e)),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"font" if in_fonts => fonts.push(None),
                b"color" => {
                    if let Some(font) = current_font.as_mut() {
                        *font = attr_value(&e, b"rgb");
                    }
                }
                b"xf" if in_cell_xfs => xf_fonts.push(font_id(&e)),
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"fonts" => in_fonts = false,
                b"font" => {
                    if let Some(font) = current_font.take() {
                        fonts.push(font);
                    }
                }
                b"cellXfs" => in_cell_xfs = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ConvertError::Xml {
                    part: STYLES_PART.to_string(),
                    message: e.to_string(),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(xf_fonts
        .into_iter()
        .map(|id| fonts.get(id).cloned().flatten())
        .collect())
}

/// Style index of every cell in a sheet part, keyed by 0-based (row, column).
///
/// Cells without an `s` attribute use style 0.
pub fn cell_style_indices(sheet_xml: &str, part: &str) -> Result<HashMap<(u32, u32), usize>> {
    let mut styles = HashMap::new();
    let mut row: u32 = 0;
    let mut next_row: u32 = 0;
    let mut next_column: u32 = 0;

    let mut reader = XmlReader::from_str(sheet_xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"row" => {
                    row = attr_value(&e, b"r")
                        .and_then(|r| r.parse::<u32>().ok())
                        .and_then(|r| r.checked_sub(1))
                        .unwrap_or(next_row);
                    next_row = row + 1;
                    next_column = 0;
                }
                b"c" => {
                    let (cell_row, column) = match attr_value(&e, b"r") {
                        Some(reference) => parse_cell_ref(&reference)?,
                        None => (row, next_column),
                    };
                    next_column = column + 1;
                    let style = attr_value(&e, b"s")
                        .and_then(|s| s.parse::<usize>().ok())
                        .unwrap_or(0);
                    styles.insert((cell_row, column), style);
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ConvertError::Xml {
                    part: part.to_string(),
                    message: e.to_string(),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(styles)
}

/// Sheet name and relationship id for every `<sheet>` in workbook order.
fn sheet_relationships(workbook_xml: &str) -> Result<Vec<(String, String)>> {
    let mut sheets = Vec::new();
    let mut reader = XmlReader::from_str(workbook_xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"sheet" => {
                if let (Some(name), Some(id)) = (attr_value(&e, b"name"), attr_value(&e, b"id")) {
                    sheets.push((name, id));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ConvertError::Xml {
                    part: WORKBOOK_PART.to_string(),
                    message: e.to_string(),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Relationship id -> archive part path.
fn relationship_targets(rels_xml: &str) -> Result<HashMap<String, String>> {
    let mut targets = HashMap::new();
    let mut reader = XmlReader::from_str(rels_xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                if let (Some(id), Some(target)) = (attr_value(&e, b"Id"), attr_value(&e, b"Target"))
                {
                    targets.insert(id, resolve_target(&target));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ConvertError::Xml {
                    part: WORKBOOK_RELS_PART.to_string(),
                    message: e.to_string(),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(targets)
}

/// Targets are relative to `xl/` unless they start with `/`.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}

fn font_id(e: &BytesStart) -> usize {
    attr_value(e, b"fontId")
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// Attribute value by local name (namespace prefix ignored).
fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .with_checks(false)
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == key)
        .map(|attr| {
            let raw = String::from_utf8_lossy(&attr.value).into_owned();
            match quick_xml::escape::unescape(&raw) {
                Ok(value) => value.into_owned(),
                Err(_) => raw,
            }
        })
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, part: &str) -> Result<String> {
    read_optional_part(archive, part)?.ok_or_else(|| ConvertError::Archive {
        part: part.to_string(),
        message: "part not found".to_string(),
    })
}

fn read_optional_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    part: &str,
) -> Result<Option<String>> {
    let mut file = match archive.by_name(part) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => {
            return Err(ConvertError::Archive {
                part: part.to_string(),
                message: e.to_string(),
            })
        }
    };
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(Some(content))
}
