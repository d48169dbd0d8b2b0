//! Reduces a SensorTable to a one-line Nagios status summary.
//!
//! Output formats:
//!   all:       "ps1_status - PRESENT;cpu1_status - OK;..."
//!   selector:  "battery - OK;"  (perfdata: "battery - OK;| OK")

use crate::error::ProbeError;
use crate::report::types::{Attributes, SensorTable, STATUS_ATTR};

/// Selector that reports every instance in the table.
pub const ALL_SELECTOR: &str = "all";

/// Status racadm prints for sensors that have no health reading.
pub const PLACEHOLDER_STATUS: &str = "N\\A";

/// Qualifies an instance with its category: `category/instance`.
const QUALIFIED_SEPARATOR: char = '/';

/// Health rank of a racadm status string, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Warning,
    Unknown,
    Critical,
}

impl Severity {
    /// Statuses arrive with whitespace removed ("Non-Critical", "FullRedundant").
    pub fn from_status(status: &str) -> Self {
        match status.to_lowercase().as_str() {
            "ok" | "good" | "normal" | "present" | "closed" | "fullredundant" | "full" => Severity::Ok,
            "non-critical" | "noncritical" | "warning" | "degraded" | "absent" | "redundancydegraded" => {
                Severity::Warning
            }
            "critical" | "failed" | "fatal" | "lost" | "non-recoverable" | "nonrecoverable"
            | "redundancylost" | "open" => Severity::Critical,
            _ => Severity::Unknown,
        }
    }
}

/// Build the summary line for `selector`.
///
/// `all` lists every instance with a reportable status and ignores
/// `include_perfdata`. Any other selector is resolved by [`resolve_status`].
pub fn summarize(table: &SensorTable, selector: &str, include_perfdata: bool) -> Result<String, ProbeError> {
    if selector == ALL_SELECTOR {
        return Ok(summarize_all(table));
    }

    let status = resolve_status(table, selector)?.to_uppercase();
    let mut output = format!("{} - {};", selector, status);
    if include_perfdata {
        output.push_str(&format!("| {}", status));
    }

    Ok(output)
}

fn summarize_all(table: &SensorTable) -> String {
    let mut output = String::new();
    for (_, instances) in table.categories() {
        for (name, attributes) in instances {
            if let Some(status) = reportable_status(attributes) {
                output.push_str(&format!("{} - {};", name, status.to_uppercase()));
            }
        }
    }
    output
}

/// Status of an instance unless it is missing, empty or the N\A placeholder.
fn reportable_status(attributes: &Attributes) -> Option<&str> {
    attributes
        .get(STATUS_ATTR)
        .map(String::as_str)
        .filter(|status| !status.is_empty() && *status != PLACEHOLDER_STATUS)
}

/// Find the status a selector refers to.
///
/// Lookup order:
///   1. `category/instance` addresses one instance exactly.
///   2. A bare name matching an instance; a category of the same name is
///      searched first, then every category in table order.
///   3. A bare name matching a category rolls the category up to the status
///      of its most severe instance.
pub fn resolve_status<'a>(table: &'a SensorTable, selector: &str) -> Result<&'a str, ProbeError> {
    let not_found = || ProbeError::SelectorLookup(selector.to_string());

    if let Some((category, instance)) = selector.split_once(QUALIFIED_SEPARATOR) {
        return table
            .instance(category, instance)
            .and_then(|attributes| attributes.get(STATUS_ATTR))
            .map(String::as_str)
            .ok_or_else(not_found);
    }

    let same_named = table.category(selector).and_then(|instances| instances.get(selector));
    let matched = same_named.or_else(|| {
        table
            .categories()
            .find_map(|(_, instances)| instances.get(selector))
    });
    if let Some(attributes) = matched {
        return attributes
            .get(STATUS_ATTR)
            .map(String::as_str)
            .ok_or_else(not_found);
    }

    table
        .category(selector)
        .and_then(|instances| {
            instances
                .values()
                .filter_map(reportable_status)
                .max_by_key(|status| Severity::from_status(status))
        })
        .ok_or_else(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn sample_table() -> SensorTable {
        let mut table = SensorTable::new();
        table.insert_instance("battery", "system_board_cmos_battery".into(), attrs(&[("status", "ok")]));
        table.insert_instance("power", "ps1_status".into(), attrs(&[("status", "Present"), ("type", "AC")]));
        table.insert_instance("power", "ps2_status".into(), attrs(&[("status", "N\\A")]));
        table.insert_instance("temperature", "cpu1_temp".into(), attrs(&[("status", ""), ("reading", "40")]));
        table.insert_instance("voltage", "cpu1_vcore".into(), attrs(&[("status", "Ok"), ("reading", "Good")]));
        table.insert_instance("voltage", "ps1_voltage_1".into(), attrs(&[("status", "Critical")]));
        table.insert_instance("memory", "dimm_a1".into(), attrs(&[("type", "DDR-4")]));
        table
    }

    #[test]
    fn test_all_lists_reportable_statuses() {
        let summary = summarize(&sample_table(), "all", false).unwrap();

        assert_eq!(
            summary,
            "system_board_cmos_battery - OK;ps1_status - PRESENT;cpu1_vcore - OK;ps1_voltage_1 - CRITICAL;"
        );
    }

    #[test]
    fn test_all_skips_placeholder_status() {
        let summary = summarize(&sample_table(), "all", false).unwrap();
        assert!(!summary.contains("ps2_status"));
        assert!(!summary.contains("N\\A"));
    }

    #[test]
    fn test_all_ignores_perfdata() {
        let table = sample_table();
        assert_eq!(
            summarize(&table, "all", true).unwrap(),
            summarize(&table, "all", false).unwrap()
        );
    }

    #[test]
    fn test_all_on_empty_table() {
        assert_eq!(summarize(&SensorTable::new(), "all", false).unwrap(), "");
    }

    #[test]
    fn test_single_selector_with_and_without_perfdata() {
        let mut table = SensorTable::new();
        table.insert_instance("battery", "battery".into(), attrs(&[("status", "ok")]));

        assert_eq!(summarize(&table, "battery", true).unwrap(), "battery - OK;| OK");
        assert_eq!(summarize(&table, "battery", false).unwrap(), "battery - OK;");
    }

    #[test]
    fn test_category_selector_rolls_up_to_worst_status() {
        let table = sample_table();

        assert_eq!(summarize(&table, "battery", true).unwrap(), "battery - OK;| OK");
        assert_eq!(summarize(&table, "voltage", false).unwrap(), "voltage - CRITICAL;");
        assert_eq!(summarize(&table, "power", false).unwrap(), "power - PRESENT;");
    }

    #[test]
    fn test_instance_selector_searches_all_categories() {
        let table = sample_table();
        assert_eq!(summarize(&table, "cpu1_vcore", false).unwrap(), "cpu1_vcore - OK;");
    }

    #[test]
    fn test_qualified_selector() {
        let table = sample_table();
        assert_eq!(
            summarize(&table, "power/ps1_status", true).unwrap(),
            "power/ps1_status - PRESENT;| PRESENT"
        );
        assert!(matches!(
            summarize(&table, "battery/ps1_status", false),
            Err(ProbeError::SelectorLookup(_))
        ));
    }

    #[test]
    fn test_unknown_selector_is_lookup_error() {
        match summarize(&sample_table(), "nonexistent", false) {
            Err(ProbeError::SelectorLookup(selector)) => assert_eq!(selector, "nonexistent"),
            other => panic!("expected SelectorLookup, got {:?}", other),
        }
    }

    #[test]
    fn test_selector_without_status_is_lookup_error() {
        let table = sample_table();
        assert!(matches!(summarize(&table, "dimm_a1", false), Err(ProbeError::SelectorLookup(_))));
        // memory has no instance carrying a status
        assert!(matches!(summarize(&table, "memory", false), Err(ProbeError::SelectorLookup(_))));
    }

    #[test]
    fn test_severity_ordering() {
        assert_eq!(Severity::from_status("Ok"), Severity::Ok);
        assert_eq!(Severity::from_status("Non-Critical"), Severity::Warning);
        assert_eq!(Severity::from_status("Failed"), Severity::Critical);
        assert_eq!(Severity::from_status("whatever"), Severity::Unknown);
        assert!(Severity::Critical > Severity::Unknown);
        assert!(Severity::Unknown > Severity::Warning);
        assert!(Severity::Warning > Severity::Ok);
    }
}
