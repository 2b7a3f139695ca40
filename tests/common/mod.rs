//! Builders for small XLSX workbooks used by the integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Header row used by most fixtures.
pub const HEADER: &[&str] = &[
    "Message ID",
    "ParticipantID",
    "Message Date",
    "Message Time",
    "Day",
    "Category",
    "Other Label",
    "Category Justification",
    "Satisfied",
    "Satisfaction Justification",
    "Registration Date",
    "Stud_Week",
    "Response Latency",
    "Emergency Response",
    "Input Cost",
    "Output Cost",
    "Total Cost",
];

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Spreadsheet-style column letters for a zero-based index.
pub fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Render sheet XML. Numeric text becomes a value cell, other text a shared
/// string appended to `strings`; empty text produces no cell at all.
pub fn sheet_xml(rows: &[Vec<String>], strings: &mut Vec<String>) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    for (r, row) in rows.iter().enumerate() {
        xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, text) in row.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            let reference = format!("{}{}", column_letters(c), r + 1);
            if text.parse::<f64>().is_ok() {
                xml.push_str(&format!(r#"<c r="{reference}"><v>{text}</v></c>"#));
            } else {
                let idx = strings.iter().position(|s| s == text).unwrap_or_else(|| {
                    strings.push(text.clone());
                    strings.len() - 1
                });
                xml.push_str(&format!(r#"<c r="{reference}" t="s"><v>{idx}</v></c>"#));
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

pub fn shared_strings_xml(strings: &[String]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">"#,
        strings.len()
    );
    for s in strings {
        xml.push_str(&format!(r#"<si><t xml:space="preserve">{}</t></si>"#, escape(s)));
    }
    xml.push_str("</sst>");
    xml
}

pub fn workbook_xml(names: &[&str]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    for (i, name) in names.iter().enumerate() {
        xml.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape(name),
            i + 1,
            i + 1
        ));
    }
    xml.push_str("</sheets></workbook>");
    xml
}

pub fn workbook_rels_xml(count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for i in 1..=count {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{i}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{i}.xml"/>"#
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// Zip arbitrary parts into a container.
pub fn zip_parts(parts: &[(String, String)]) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, body) in parts {
        zip.start_file(name.as_str(), options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }

    zip.finish().unwrap();
    buffer
}

/// Build a workbook with one worksheet per `(name, rows)` entry.
pub fn build_workbook(sheets: &[(&str, Vec<Vec<String>>)]) -> Vec<u8> {
    let mut strings = Vec::new();
    let mut parts = Vec::new();

    let names: Vec<&str> = sheets.iter().map(|(name, _)| *name).collect();
    parts.push(("xl/workbook.xml".to_string(), workbook_xml(&names)));
    parts.push((
        "xl/_rels/workbook.xml.rels".to_string(),
        workbook_rels_xml(sheets.len()),
    ));

    for (i, (_, rows)) in sheets.iter().enumerate() {
        parts.push((
            format!("xl/worksheets/sheet{}.xml", i + 1),
            sheet_xml(rows, &mut strings),
        ));
    }
    parts.push(("xl/sharedStrings.xml".to_string(), shared_strings_xml(&strings)));

    zip_parts(&parts)
}

/// Turn string-slice rows into owned rows.
pub fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
    data.iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

/// One data row matching [`HEADER`].
#[allow(clippy::too_many_arguments)]
pub fn interaction_row(
    message_id: &str,
    participant: &str,
    date_serial: &str,
    time_fraction: &str,
    category: &str,
    other_label: &str,
    input_cost: &str,
    output_cost: &str,
) -> Vec<String> {
    let total = match (input_cost.parse::<f64>(), output_cost.parse::<f64>()) {
        (Ok(i), Ok(o)) => (i + o).to_string(),
        _ => String::new(),
    };
    [
        message_id,
        participant,
        date_serial,
        time_fraction,
        "Sunday",
        category,
        other_label,
        "",
        "TRUE",
        "",
        "44900",
        "2.0",
        "3.5",
        "no",
        input_cost,
        output_cost,
        total.as_str(),
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
