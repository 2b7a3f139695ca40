//! Sheet name resolution from `xl/workbook.xml` and its relationships.

use crate::container::OoxmlContainer;
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// Path of the workbook manifest part.
pub const WORKBOOK_PART: &str = "xl/workbook.xml";

/// Path of the workbook manifest's relationship part.
pub const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";

/// A worksheet declared by the workbook manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEntry {
    /// Display name (e.g., "merged_data-all")
    pub name: String,
    /// Relationship ID (e.g., "rId1")
    pub rel_id: String,
    /// Container path of the sheet XML (e.g., "xl/worksheets/sheet1.xml")
    pub path: String,
}

/// Mapping from sheet display name to sheet part path, in manifest order.
#[derive(Debug, Clone, Default)]
pub struct SheetMap {
    sheets: Vec<SheetEntry>,
}

impl SheetMap {
    /// Read the manifest and its relationships from a container.
    ///
    /// Both parts are required; a missing one is fatal.
    pub fn load(container: &OoxmlContainer) -> Result<Self> {
        let workbook = container.read_xml(WORKBOOK_PART)?;
        let rels = container.read_xml(WORKBOOK_RELS_PART)?;
        Self::parse(&workbook, &rels)
    }

    /// Build the mapping from manifest and relationships XML.
    ///
    /// Sheets whose relationship ID has no target are left out.
    pub fn parse(workbook_xml: &str, rels_xml: &str) -> Result<Self> {
        let targets = parse_relationship_targets(rels_xml)?;
        let mut sheets = Vec::new();

        for (name, rel_id) in parse_sheet_declarations(workbook_xml)? {
            match targets.get(&rel_id) {
                Some(target) => sheets.push(SheetEntry {
                    path: OoxmlContainer::resolve_path(WORKBOOK_PART, target),
                    name,
                    rel_id,
                }),
                None => {
                    tracing::debug!(sheet = %name, rel_id = %rel_id, "sheet has no relationship target");
                }
            }
        }

        Ok(Self { sheets })
    }

    /// Look up the part path for a sheet name.
    ///
    /// Fails with [`Error::SheetNotFound`] listing every known sheet name.
    pub fn path_of(&self, name: &str) -> Result<&str> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.path.as_str())
            .ok_or_else(|| {
                let mut available: Vec<String> =
                    self.sheets.iter().map(|s| s.name.clone()).collect();
                available.sort();
                Error::SheetNotFound {
                    sheet: name.to_string(),
                    available,
                }
            })
    }

    /// Sheets in manifest order.
    pub fn sheets(&self) -> &[SheetEntry] {
        &self.sheets
    }

    /// Sheet names in manifest order.
    pub fn names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

fn attribute_text(e: &BytesStart<'_>, matches: impl Fn(&[u8], bool) -> bool) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if matches(attr.key.local_name().as_ref(), attr.key.prefix().is_some()) {
            let value = attr
                .unescape_value()
                .map_err(|err| Error::XmlParse(err.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Parse relationship ID -> target pairs.
fn parse_relationship_targets(xml: &str) -> Result<HashMap<String, String>> {
    let mut targets = HashMap::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let id = attribute_text(e, |name, _| name == b"Id")?;
                let target = attribute_text(e, |name, _| name == b"Target")?;
                if let (Some(id), Some(target)) = (id, target) {
                    if !id.is_empty() && !target.is_empty() {
                        targets.insert(id, target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(targets)
}

/// Parse `<sheet name=".." r:id=".."/>` declarations in document order.
fn parse_sheet_declarations(xml: &str) -> Result<Vec<(String, String)>> {
    let mut sheets = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.local_name().as_ref() == b"sheet" =>
            {
                let name = attribute_text(e, |name, prefixed| name == b"name" && !prefixed)?;
                // The relationship attribute is namespaced; its prefix varies between writers.
                let rel_id = attribute_text(e, |name, prefixed| name == b"id" && prefixed)?;
                if let (Some(name), Some(rel_id)) = (name, rel_id) {
                    sheets.push((name, rel_id));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}
