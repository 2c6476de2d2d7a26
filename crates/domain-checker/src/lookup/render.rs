use crate::prelude::*;
use colored::Colorize;
use domain_checker_core::display::{DisplayRecord, ViewMode};

/// Build pretty JSON for a display record
pub fn format_json(record: &DisplayRecord) -> Result<String> {
    serde_json::to_string_pretty(record).context("Failed to serialize lookup result")
}

/// Render a display record as a titled label/value table
///
/// Purely generic: lists are joined with `", "`, missing values are blank.
pub fn format_table(record: &DisplayRecord, mode: ViewMode) -> String {
    let mut table = new_table();

    for (label, value) in record.fields() {
        table.add_row(prettytable::row![label.bold(), value]);
    }

    f!("\n{}\n\n{}\n", mode.title().bright_white().bold(), table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_checker_core::display::DisplayValue;

    fn create_test_record() -> DisplayRecord {
        DisplayRecord::from_iter([
            ("Domain Name", DisplayValue::text("example.com")),
            ("Registrar", DisplayValue::Text(None)),
            (
                "Hostnames",
                DisplayValue::List(vec![
                    "a.iana-servers.net".to_string(),
                    "b.iana-servers.net".to_string(),
                ]),
            ),
        ])
    }

    #[test]
    fn test_format_table_contains_title_and_fields() {
        let output = format_table(&create_test_record(), ViewMode::Domain);

        assert!(output.contains("Domain Information"));
        assert!(output.contains("Domain Name"));
        assert!(output.contains("example.com"));
        assert!(output.contains("a.iana-servers.net, b.iana-servers.net"));
    }

    #[test]
    fn test_format_table_keeps_field_order() {
        let output = format_table(&create_test_record(), ViewMode::Domain);

        let domain = output.find("Domain Name").unwrap();
        let registrar = output.find("Registrar").unwrap();
        let hostnames = output.find("Hostnames").unwrap();

        assert!(domain < registrar);
        assert!(registrar < hostnames);
    }

    #[test]
    fn test_format_table_contact_title() {
        let output = format_table(&DisplayRecord::default(), ViewMode::Contact);
        assert!(output.contains("Contact Information"));
    }

    #[test]
    fn test_format_json_keeps_null_fields() {
        let json = format_json(&create_test_record()).unwrap();

        assert!(json.contains("\"Domain Name\": \"example.com\""));
        assert!(json.contains("\"Registrar\": null"));
        assert!(json.contains("\"Hostnames\": ["));
    }
}
