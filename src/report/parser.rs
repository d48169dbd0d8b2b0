//! racadm getsensorinfo text parser.
//! Converts the whitespace-aligned, multi-section report into a SensorTable.
//!
//! Report layout (line endings are significant):
//!   "<intro>\r\r\nSensor Type : POWER\r\n<Sensor Name>  <Status>  <Type>\r\nPS1 Status  Present  AC\r\n\r\n"
//!   "Sensor Type : TEMPERATURE\r\n<Sensor Name>  <Status>  <Reading>\r\n..."
//!
//! Parsing is best effort: a section whose category/heading pair cannot be
//! resolved is dropped and the rest of the report is still parsed.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, trace};

use super::types::{Attributes, SensorTable};

const SECTION_TERMINATOR: &str = "\r\n\r\n";
const ROW_TERMINATOR: &str = "\r\n";
/// Separates the intro line from the first sensor section.
const HEADER_MARKER: &str = "\r\r\n";
/// Fields are separated by two or more spaces; sensor names contain single spaces.
const FIELD_DELIMITER: &str = "  ";
const CATEGORY_LINE_TOKEN: &str = "Sensor Type";
/// Categories whose readings are reduced to digits only.
const NUMERIC_CATEGORIES: [&str; 2] = ["fan", "temperature"];

fn annotation_regex() -> &'static Regex {
    static ANNOTATION: OnceLock<Regex> = OnceLock::new();
    ANNOTATION.get_or_init(|| Regex::new(r"\[.+?\]").expect("annotation pattern is valid"))
}

/// Category and column headings resolved from the top of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SectionHeader {
    category: String,
    /// Position 0 is the instance-name column.
    headings: Vec<String>,
}

/// Parse a raw report into a SensorTable. Never fails; malformed sections are skipped.
pub fn parse(raw: &str) -> SensorTable {
    let mut table = SensorTable::new();
    let mut sections = raw.split(SECTION_TERMINATOR);

    // The first section carries the intro line and annotation noise. Its
    // cleaned form is parsed after every body section.
    let header = sections.next().and_then(clean_header_section);

    let mut skipped = 0usize;
    for section in sections {
        if !parse_section(section, &mut table) {
            skipped += 1;
        }
    }
    if let Some(header) = header {
        if !parse_section(&header, &mut table) {
            skipped += 1;
        }
    }

    debug!(
        "Parsed sensor report: {} categories, {} instances, {} sections skipped",
        table.len(),
        table.instance_count(),
        skipped
    );
    table
}

/// Take the part of the first section after the intro marker and strip `[...]`
/// annotations from each line. Returns None when the marker is absent.
fn clean_header_section(section: &str) -> Option<String> {
    let body = section.split(HEADER_MARKER).nth(1)?;
    let annotation = annotation_regex();

    let cleaned = body
        .split(ROW_TERMINATOR)
        .filter(|line| !line.is_empty())
        .map(|line| format!("{}{}", annotation.replace_all(line, ""), ROW_TERMINATOR))
        .collect();

    Some(cleaned)
}

/// Merge one section into `table`. Returns false if the section was skipped.
fn parse_section(section: &str, table: &mut SensorTable) -> bool {
    let lines: Vec<&str> = section
        .split(ROW_TERMINATOR)
        .filter(|line| !line.is_empty())
        .collect();

    let header = match resolve_section(&lines) {
        Some(header) => header,
        None => {
            trace!("Skipping unresolvable section ({} lines)", lines.len());
            return false;
        }
    };

    let instances = table.ensure_category(&header.category);
    for line in lines.iter().filter(|line| is_data_row(line)) {
        if let Some((name, attributes)) = parse_row(line, &header) {
            instances.insert(name, attributes);
        }
    }

    true
}

/// Resolve the category/heading pair from lines [0,1], falling back to [1,2]
/// when the section opens with a noise line.
fn resolve_section(lines: &[&str]) -> Option<SectionHeader> {
    resolve_at(lines, 0).or_else(|| resolve_at(lines, 1))
}

fn resolve_at(lines: &[&str], start: usize) -> Option<SectionHeader> {
    let category_line = lines.get(start)?;
    let heading_line = lines.get(start + 1)?;

    let category = format_name(category_line.split(':').nth(1)?);
    if category.is_empty() {
        return None;
    }

    let headings = clean_headings(heading_line)?;
    Some(SectionHeader { category, headings })
}

/// Split a `<Sensor Name>  <Status>  <Reading>` line into lowercase headings.
/// Returns None when the line is not a heading line or a heading cleans to nothing.
fn clean_headings(line: &str) -> Option<Vec<String>> {
    if !line.contains('>') {
        return None;
    }

    let headings: Vec<String> = line
        .split('>')
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.replace('<', "").trim().to_lowercase())
        .collect();

    if headings.is_empty() || headings.iter().any(|h| h.is_empty()) {
        return None;
    }
    Some(headings)
}

fn is_data_row(line: &str) -> bool {
    !line.is_empty() && !line.contains(CATEGORY_LINE_TOKEN) && !line.contains('<')
}

/// Split a data row into its instance name and attribute map.
/// Readings beyond the last heading are ignored. Returns None if nothing was read.
fn parse_row(line: &str, header: &SectionHeader) -> Option<(String, Attributes)> {
    let fields: Vec<&str> = line
        .split(FIELD_DELIMITER)
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .collect();

    let (name, readings) = fields.split_first()?;

    let mut attributes = Attributes::new();
    for (index, reading) in readings.iter().enumerate().map(|(i, r)| (i + 1, r)) {
        let Some(heading) = header.headings.get(index) else {
            trace!("Row '{}' has more fields than headings; ignoring the rest", name);
            break;
        };
        attributes.insert(heading.clone(), normalize_reading(&header.category, reading));
    }

    if attributes.is_empty() {
        return None;
    }
    Some((format_name(name), attributes))
}

/// `" System Board Inlet Temp "` -> `"system_board_inlet_temp"`
fn format_name(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Remove all whitespace; fan and temperature readings keep digits only.
fn normalize_reading(category: &str, raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if NUMERIC_CATEGORIES.contains(&category) {
        compact.chars().filter(|c| c.is_ascii_digit()).collect()
    } else {
        compact
    }
}
