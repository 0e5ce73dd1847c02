//! XML parsing for formatting that calamine does not expose

use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::{BufReader, Read, Seek};
use zip::ZipArchive;

/// Formatting of the first header cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderStyle {
    /// Index into `cellXfs`
    pub style_index: usize,
    pub bold: bool,
    /// `patternType` of the fill, e.g. `solid`
    pub fill_pattern: Option<String>,
    /// ARGB foreground color of the fill
    pub fill_color: Option<String>,
}

impl HeaderStyle {
    /// Bold text on a solid background
    pub fn is_highlighted(&self) -> bool {
        self.bold && self.fill_pattern.as_deref() == Some("solid")
    }
}

#[derive(Default)]
struct FontInfo {
    bold: bool,
}

#[derive(Default)]
struct FillInfo {
    pattern: Option<String>,
    fg_color: Option<String>,
}

struct XfInfo {
    font_id: usize,
    fill_id: usize,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Other,
    Fonts,
    Fills,
    CellXfs,
}

/// Resolve the style of cell A1 of the first worksheet
pub fn header_style_from_xlsx<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<HeaderStyle> {
    let style_index = {
        let sheet = archive
            .by_name("xl/worksheets/sheet1.xml")
            .context("Missing xl/worksheets/sheet1.xml")?;
        first_cell_style(sheet)?
    };

    let mut styles_xml = String::new();
    archive
        .by_name("xl/styles.xml")
        .context("Missing xl/styles.xml")?
        .read_to_string(&mut styles_xml)?;

    resolve_style(&styles_xml, style_index)
}

/// Style index of the first cell in the sheet, 0 when unstyled.
///
/// Stops at the first cell so large sheets are not read to the end.
fn first_cell_style<R: Read>(sheet: R) -> Result<usize> {
    let mut reader = Reader::from_reader(BufReader::new(sheet));
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"c" => {
                return match attr_value(&e, b"s")? {
                    Some(s) => Ok(s.parse()?),
                    None => Ok(0),
                };
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"row" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(anyhow::anyhow!("Error parsing XML: {}", e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(0)
}

fn resolve_style(styles_xml: &str, style_index: usize) -> Result<HeaderStyle> {
    let mut reader = Reader::from_str(styles_xml);
    let mut section = Section::Other;
    let mut fonts: Vec<FontInfo> = Vec::new();
    let mut fills: Vec<FillInfo> = Vec::new();
    let mut xfs: Vec<XfInfo> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"fonts" => section = Section::Fonts,
                b"fills" => section = Section::Fills,
                b"cellXfs" => section = Section::CellXfs,
                _ => collect_style_element(&e, section, &mut fonts, &mut fills, &mut xfs)?,
            },
            Ok(Event::Empty(e)) => {
                collect_style_element(&e, section, &mut fonts, &mut fills, &mut xfs)?
            }
            Ok(Event::End(e)) => {
                if matches!(e.local_name().as_ref(), b"fonts" | b"fills" | b"cellXfs") {
                    section = Section::Other;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(anyhow::anyhow!("Error parsing XML: {}", e)),
            _ => {}
        }
    }

    let xf = xfs
        .get(style_index)
        .with_context(|| format!("Style index {} not found in cellXfs", style_index))?;
    let bold = fonts.get(xf.font_id).is_some_and(|f| f.bold);
    let (fill_pattern, fill_color) = fills
        .get(xf.fill_id)
        .map(|f| (f.pattern.clone(), f.fg_color.clone()))
        .unwrap_or_default();

    Ok(HeaderStyle {
        style_index,
        bold,
        fill_pattern,
        fill_color,
    })
}

fn collect_style_element(
    e: &BytesStart,
    section: Section,
    fonts: &mut Vec<FontInfo>,
    fills: &mut Vec<FillInfo>,
    xfs: &mut Vec<XfInfo>,
) -> Result<()> {
    match (section, e.local_name().as_ref()) {
        (Section::Fonts, b"font") => fonts.push(FontInfo::default()),
        (Section::Fonts, b"b") => {
            if let Some(font) = fonts.last_mut() {
                // <b/> means bold; <b val="0"/> switches it off
                let val = attr_value(e, b"val")?;
                font.bold = !matches!(val.as_deref(), Some("0") | Some("false"));
            }
        }
        (Section::Fills, b"fill") => fills.push(FillInfo::default()),
        (Section::Fills, b"patternFill") => {
            if let Some(fill) = fills.last_mut() {
                fill.pattern = attr_value(e, b"patternType")?;
            }
        }
        (Section::Fills, b"fgColor") => {
            if let Some(fill) = fills.last_mut() {
                fill.fg_color = attr_value(e, b"rgb")?;
            }
        }
        (Section::CellXfs, b"xf") => {
            let font_id = attr_value(e, b"fontId")?.map(|v| v.parse()).transpose()?;
            let fill_id = attr_value(e, b"fillId")?.map(|v| v.parse()).transpose()?;
            xfs.push(XfInfo {
                font_id: font_id.unwrap_or(0),
                fill_id: fill_id.unwrap_or(0),
            });
        }
        _ => {}
    }
    Ok(())
}

fn attr_value(e: &BytesStart, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(String::from_utf8(attr.value.to_vec())?));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<fonts count="2">
<font><sz val="11"/><color theme="1"/><name val="Calibri"/></font>
<font><b/><sz val="11"/><color theme="1"/><name val="Calibri"/></font>
</fonts>
<fills count="3">
<fill><patternFill patternType="none"/></fill>
<fill><patternFill patternType="gray125"/></fill>
<fill><patternFill patternType="solid">
<fgColor rgb="FFE0E0E0"/><bgColor indexed="64"/>
</patternFill></fill>
</fills>
<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
<cellXfs count="3">
<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
<xf numFmtId="0" fontId="1" fillId="2" borderId="0" xfId="0" applyFont="1" applyFill="1"/>
<xf numFmtId="164" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
</cellXfs>
<dxfs count="1"><dxf><font><b/></font></dxf></dxfs>
</styleSheet>"#;

    #[test]
    fn test_resolve_highlighted_style() {
        let style = resolve_style(STYLES, 1).unwrap();
        assert!(style.bold);
        assert_eq!(style.fill_pattern.as_deref(), Some("solid"));
        assert_eq!(style.fill_color.as_deref(), Some("FFE0E0E0"));
        assert!(style.is_highlighted());
    }

    #[test]
    fn test_resolve_plain_style() {
        let style = resolve_style(STYLES, 2).unwrap();
        assert!(!style.bold);
        assert_eq!(style.fill_pattern.as_deref(), Some("none"));
        assert!(!style.is_highlighted());

        assert!(resolve_style(STYLES, 3).is_err());
    }

    #[test]
    fn test_first_cell_style() {
        let sheet = r#"<worksheet><sheetData>
<row r="1"><c r="A1" s="1" t="s"><v>0</v></c><c r="B1" s="1" t="s"><v>1</v></c></row>
<row r="2"><c r="A2" t="s"><v>2</v></c></row>
</sheetData></worksheet>"#;
        assert_eq!(first_cell_style(sheet.as_bytes()).unwrap(), 1);

        let unstyled = r#"<worksheet><sheetData>
<row r="1"><c r="A1"><v>3</v></c></row>
</sheetData></worksheet>"#;
        assert_eq!(first_cell_style(unstyled.as_bytes()).unwrap(), 0);

        let empty = r#"<worksheet><sheetData/></worksheet>"#;
        assert_eq!(first_cell_style(empty.as_bytes()).unwrap(), 0);
    }
}
