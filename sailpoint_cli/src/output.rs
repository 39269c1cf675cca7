use std::io::Stdout;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use sailpoint_lib::types::{
    document_name, document_type, AccessProfile, Account, SearchDocument, Transform, Workgroup,
};
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// A record the CLI knows how to print as a table or CSV row.
pub trait Record: Serialize {
    type Row: Tabled + Serialize;

    fn row(&self) -> Self::Row;
}

#[derive(Tabled, Serialize)]
pub struct AccountRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Source")]
    #[serde(rename = "Source")]
    source: String,
    #[tabled(rename = "Identity")]
    #[serde(rename = "Identity")]
    identity: String,
    #[tabled(rename = "Disabled")]
    #[serde(rename = "Disabled")]
    disabled: bool,
    #[tabled(rename = "Created")]
    #[serde(rename = "Created")]
    created: String,
}

#[derive(Tabled, Serialize)]
pub struct AccessProfileRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Source")]
    #[serde(rename = "Source")]
    source: String,
    #[tabled(rename = "Enabled")]
    #[serde(rename = "Enabled")]
    enabled: bool,
    #[tabled(rename = "Requestable")]
    #[serde(rename = "Requestable")]
    requestable: bool,
    #[tabled(rename = "Entitlements")]
    #[serde(rename = "Entitlements")]
    entitlements: usize,
}

#[derive(Tabled, Serialize)]
pub struct TransformRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    transform_type: String,
    #[tabled(rename = "Internal")]
    #[serde(rename = "Internal")]
    internal: bool,
}

#[derive(Tabled, Serialize)]
pub struct WorkgroupRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Owner")]
    #[serde(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Members")]
    #[serde(rename = "Members")]
    members: i64,
    #[tabled(rename = "Connections")]
    #[serde(rename = "Connections")]
    connections: i64,
}

#[derive(Tabled, Serialize)]
pub struct SearchRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    doc_type: String,
}

// -- Row builders --

impl Record for Account {
    type Row = AccountRow;

    fn row(&self) -> AccountRow {
        AccountRow {
            id: self.id.clone(),
            name: self.name.clone(),
            source: self
                .source_name
                .clone()
                .unwrap_or_else(|| self.source_id.clone()),
            identity: self.identity_id.clone().unwrap_or_default(),
            disabled: self.disabled,
            created: format_date(self.created),
        }
    }
}

impl Record for AccessProfile {
    type Row = AccessProfileRow;

    fn row(&self) -> AccessProfileRow {
        AccessProfileRow {
            id: self.id.clone(),
            name: self.name.clone(),
            source: self
                .source
                .as_ref()
                .and_then(|s| s.name.clone())
                .unwrap_or_default(),
            enabled: self.enabled,
            requestable: self.requestable,
            entitlements: self.entitlements.len(),
        }
    }
}

impl Record for Transform {
    type Row = TransformRow;

    fn row(&self) -> TransformRow {
        TransformRow {
            id: self.id.clone(),
            name: self.name.clone(),
            transform_type: self.transform_type.clone(),
            internal: self.internal,
        }
    }
}

impl Record for Workgroup {
    type Row = WorkgroupRow;

    fn row(&self) -> WorkgroupRow {
        WorkgroupRow {
            id: self.id.clone(),
            name: self.name.clone(),
            owner: self
                .owner
                .as_ref()
                .and_then(|o| o.name.clone())
                .unwrap_or_default(),
            members: self.member_count,
            connections: self.connection_count,
        }
    }
}

impl Record for SearchDocument {
    type Row = SearchRow;

    fn row(&self) -> SearchRow {
        SearchRow {
            id: self
                .get("id")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            name: document_name(self).unwrap_or_default().to_string(),
            doc_type: document_type(self).unwrap_or_default().to_string(),
        }
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// -- Batch output --

pub fn print_records<T: Record>(items: &[T], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", Table::new(items.iter().map(Record::row)));
            Ok(())
        }
        OutputFormat::Json => {
            print_json(&items);
            Ok(())
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for item in items {
                wtr.serialize(item.row())?;
            }
            wtr.flush()?;
            Ok(())
        }
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

// -- Streaming output --

/// Prints records one at a time as they arrive.
///
/// JSON is written as one object per line. Tables have no fixed width up
/// front, so each record becomes a tab-separated line under a single
/// header.
pub struct StreamPrinter {
    format: OutputFormat,
    csv: Option<csv::Writer<Stdout>>,
    header_written: bool,
}

impl StreamPrinter {
    pub fn new(format: OutputFormat) -> Self {
        let csv = matches!(format, OutputFormat::Csv)
            .then(|| csv::Writer::from_writer(std::io::stdout()));
        Self {
            format,
            csv,
            header_written: false,
        }
    }

    pub fn write<T: Record>(&mut self, item: &T) -> Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(item)?),
            OutputFormat::Csv => {
                if let Some(wtr) = self.csv.as_mut() {
                    wtr.serialize(item.row())?;
                }
            }
            OutputFormat::Table => {
                if !self.header_written {
                    println!("{}", tsv_line(<T::Row as Tabled>::headers()));
                    self.header_written = true;
                }
                println!("{}", tsv_line(item.row().fields()));
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        if let Some(wtr) = self.csv.as_mut() {
            wtr.flush()?;
        }
        Ok(())
    }
}

fn tsv_line<S: AsRef<str>>(cells: Vec<S>) -> String {
    cells
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_fixture<T: serde::de::DeserializeOwned>(name: &str) -> Vec<T> {
        let path = format!(
            "{}/../sailpoint_api/tests/fixtures/{}",
            env!("CARGO_MANIFEST_DIR"),
            name
        );
        let json_str = std::fs::read_to_string(path).unwrap();
        serde_json::from_str(&json_str).unwrap()
    }

    #[test]
    fn test_format_date() {
        let date = "2023-01-10T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(format_date(Some(date)), "2023-01-10");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn test_account_row_mapping() {
        let accounts: Vec<Account> = load_fixture("accounts.json");
        let row = accounts[0].row();
        assert_eq!(row.name, "aaron.nichols");
        assert_eq!(row.source, "Active Directory");
        assert_eq!(row.identity, "2c9180857182305e0171993735622948");
        assert!(!row.disabled);
        assert_eq!(row.created, "2023-01-10");
    }

    #[test]
    fn test_account_row_falls_back_to_source_id() {
        let accounts: Vec<Account> = load_fixture("accounts.json");
        let row = accounts[1].row();
        assert_eq!(row.source, "2c918083670df373016835a1b6f2139c");
        assert_eq!(row.identity, "");
        assert_eq!(row.created, "");
    }

    #[test]
    fn test_access_profile_row_mapping() {
        let profiles: Vec<AccessProfile> = load_fixture("access_profiles.json");
        let row = profiles[0].row();
        assert_eq!(row.source, "ODS-HR Employees");
        assert!(row.enabled);
        assert!(row.requestable);
        assert_eq!(row.entitlements, 1);
    }

    #[test]
    fn test_transform_row_mapping() {
        let transforms: Vec<Transform> = load_fixture("transforms.json");
        let rows: Vec<TransformRow> = transforms.iter().map(Record::row).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].transform_type, "dateFormat");
        assert!(rows[1].internal);
    }

    #[test]
    fn test_workgroup_row_mapping() {
        let groups: Vec<Workgroup> = load_fixture("workgroups.json");
        let row = groups[0].row();
        assert_eq!(row.owner, "Support");
        assert_eq!(row.members, 12);
        assert_eq!(row.connections, 2);
    }

    #[test]
    fn test_search_row_mapping() {
        let docs: Vec<SearchDocument> = load_fixture("search_identities.json");
        let row = docs[1].row();
        assert_eq!(row.id, "2c9180865c45e7e3015c46c434a80624");
        assert_eq!(row.name, "yusuf.young");
        assert_eq!(row.doc_type, "identity");
    }

    #[test]
    fn test_search_row_tolerates_missing_fields() {
        let row = SearchDocument::new().row();
        assert_eq!(row.id, "");
        assert_eq!(row.name, "");
    }

    #[test]
    fn test_table_contains_headers() {
        let groups: Vec<Workgroup> = load_fixture("workgroups.json");
        let table = Table::new(groups.iter().map(Record::row)).to_string();
        assert!(table.contains("Members"));
        assert!(table.contains("DB Access Governance Group"));
    }

    #[test]
    fn test_csv_row_headers() {
        let transforms: Vec<Transform> = load_fixture("transforms.json");
        let mut wtr = csv::Writer::from_writer(Vec::new());
        for t in &transforms {
            wtr.serialize(t.row()).unwrap();
        }
        let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("ID,Name,Type,Internal"));
        assert_eq!(
            lines.next(),
            Some("2cd78adghjkja34jh2b1hkjhasuecd,Timestamp To Date,dateFormat,false")
        );
    }

    #[test]
    fn test_tsv_line_uses_row_fields() {
        let transforms: Vec<Transform> = load_fixture("transforms.json");
        let line = tsv_line(transforms[1].row().fields());
        assert_eq!(line, "2lkas8dhj4bkuakja77giih7l4ashh\tPrefixSubstring\tsubstring\ttrue");
        assert_eq!(tsv_line(TransformRow::headers()), "ID\tName\tType\tInternal");
    }
}
