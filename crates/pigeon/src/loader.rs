//! Loading transaction records and signed blobs from files.
//!
//! Two input formats are supported, chosen by file extension:
//!
//! - CSV with positional columns `to, from, amount, energy_limit,
//!   energy_price, nonce`. Trailing optional columns may be left out.
//! - JSON: a list of objects keyed by the same names. Numeric fields may be
//!   JSON numbers or strings.
//!
//! Empty cells, empty strings, `null`, and missing keys all mean the field
//! is absent and will be filled in by the resolver.

use crate::error::{PigeonError, PigeonResult};
use crate::transaction::TransactionRecord;
use crate::types::Amount;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Input file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma separated values.
    Csv,
    /// A JSON list of objects.
    Json,
}

impl SourceFormat {
    /// Picks the format from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Loads transaction records from a CSV or JSON file.
///
/// When `skip_first_record` is set, the first CSV line is treated as a title
/// row and discarded. It has no effect on JSON input.
///
/// # Errors
///
/// Returns [`PigeonError::Parse`] if the extension is not recognized, the
/// file cannot be read, or any record is malformed. The message names the
/// 1-based record number.
pub fn load_transactions(
    path: impl AsRef<Path>,
    skip_first_record: bool,
) -> PigeonResult<Vec<TransactionRecord>> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path)
        .ok_or_else(|| PigeonError::parse(path, "unsupported file extension"))?;
    let content = fs::read_to_string(path).map_err(|e| PigeonError::parse(path, e.to_string()))?;

    let records = match format {
        SourceFormat::Csv => parse_csv(&content, skip_first_record),
        SourceFormat::Json => parse_json(&content),
    }
    .map_err(|reason| PigeonError::parse(path, reason))?;

    tracing::debug!(path = %path.display(), count = records.len(), ?format, "loaded transactions");
    Ok(records)
}

/// Loads pre-signed transaction blobs from a JSON list of strings.
///
/// # Errors
///
/// Returns [`PigeonError::Parse`] if the file cannot be read or is not a
/// list of strings.
pub fn load_signed_transactions(path: impl AsRef<Path>) -> PigeonResult<Vec<String>> {
    let blobs = read_string_list(path.as_ref())?;
    tracing::debug!(count = blobs.len(), "loaded signed transactions");
    Ok(blobs)
}

/// Reads a JSON list of strings.
///
/// # Errors
///
/// Returns [`PigeonError::Parse`] if the file cannot be read or is not a
/// list of strings.
pub fn read_string_list(path: impl AsRef<Path>) -> PigeonResult<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| PigeonError::parse(path, e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| PigeonError::parse(path, e.to_string()))
}

fn parse_csv(content: &str, skip_first_record: bool) -> Result<Vec<TransactionRecord>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let skip = usize::from(skip_first_record);
    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate().skip(skip) {
        let number = i + 1;
        let row = row.map_err(|e| format!("record {number}: {e}"))?;
        let cell = |idx: usize| row.get(idx).filter(|c| !c.is_empty()).map(str::to_string);

        if row.len() > 6 {
            return Err(format!(
                "record {number}: expected at most 6 columns, got {}",
                row.len()
            ));
        }
        records.push(build_record(
            number,
            cell(0),
            cell(1),
            cell(2),
            cell(3),
            cell(4),
            cell(5),
        )?);
    }
    Ok(records)
}

/// One JSON input object before validation.
#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(default)]
    to: Option<Value>,
    #[serde(default)]
    from: Option<Value>,
    #[serde(default)]
    amount: Option<Value>,
    #[serde(default)]
    energy_limit: Option<Value>,
    #[serde(default)]
    energy_price: Option<Value>,
    #[serde(default)]
    nonce: Option<Value>,
}

fn parse_json(content: &str) -> Result<Vec<TransactionRecord>, String> {
    let raw: Vec<JsonRecord> = serde_json::from_str(content).map_err(|e| e.to_string())?;

    raw.into_iter()
        .enumerate()
        .map(|(i, r)| {
            let number = i + 1;
            let field = |name: &str, value: Option<Value>| {
                json_cell(value).map_err(|kind| {
                    format!("record {number}: {name} must be a string or number, got {kind}")
                })
            };
            build_record(
                number,
                field("to", r.to)?,
                field("from", r.from)?,
                field("amount", r.amount)?,
                field("energy_limit", r.energy_limit)?,
                field("energy_price", r.energy_price)?,
                field("nonce", r.nonce)?,
            )
        })
        .collect()
}

/// Converts a JSON value into an optional cell, keeping numbers as their
/// exact source text.
fn json_cell(value: Option<Value>) -> Result<Option<String>, &'static str> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let s = s.trim();
            Ok((!s.is_empty()).then(|| s.to_string()))
        }
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(_)) => Err("a boolean"),
        Some(Value::Array(_)) => Err("an array"),
        Some(Value::Object(_)) => Err("an object"),
    }
}

fn build_record(
    number: usize,
    to: Option<String>,
    from: Option<String>,
    amount: Option<String>,
    energy_limit: Option<String>,
    energy_price: Option<String>,
    nonce: Option<String>,
) -> Result<TransactionRecord, String> {
    let to = to.ok_or_else(|| format!("record {number}: missing destination address"))?;
    let from = from.ok_or_else(|| format!("record {number}: missing source address"))?;
    let amount = amount.ok_or_else(|| format!("record {number}: missing amount"))?;
    let amount: Amount = amount
        .parse()
        .map_err(|e| format!("record {number}: {e}"))?;

    Ok(TransactionRecord {
        to,
        from,
        amount,
        energy_limit,
        energy_price,
        nonce,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ALICE: &str = "cb751111111111111111111111111111111111111111";
    const BOB: &str = "cb962222222222222222222222222222222222222222";

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_source_format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("a.csv")), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_path(Path::new("a.JSON")), Some(SourceFormat::Json));
        assert_eq!(SourceFormat::from_path(Path::new("a.xml")), None);
        assert_eq!(SourceFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_csv_without_titles() {
        let file = temp_file(
            ".csv",
            &format!("{BOB},{ALICE},1.5\n{ALICE},{BOB},2,30000,5,7\n"),
        );
        let records = load_transactions(file.path(), false).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].to, BOB);
        assert_eq!(records[0].from, ALICE);
        assert_eq!(records[0].amount.to_string(), "1.5");
        assert_eq!(records[0].nonce, None);
        assert_eq!(records[1].energy_limit.as_deref(), Some("30000"));
        assert_eq!(records[1].energy_price.as_deref(), Some("5"));
        assert_eq!(records[1].nonce.as_deref(), Some("7"));
    }

    #[test]
    fn test_csv_skip_discards_exactly_one_line() {
        let content = format!("to,from,amount\n{BOB},{ALICE},1\n{BOB},{ALICE},2\n");
        let file = temp_file(".csv", &content);
        let records = load_transactions(file.path(), true).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount.to_string(), "1");

        // without the flag the title row is data and fails validation
        let err = load_transactions(file.path(), false).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("record 1"));
    }

    #[test]
    fn test_csv_empty_cells_are_absent() {
        let file = temp_file(".csv", &format!(" {BOB} , {ALICE} , 3 , , 0 ,\n"));
        let records = load_transactions(file.path(), false).unwrap();
        assert_eq!(records[0].to, BOB);
        assert_eq!(records[0].energy_limit, None);
        assert_eq!(records[0].energy_price.as_deref(), Some("0"));
        assert_eq!(records[0].nonce, None);
    }

    #[test]
    fn test_csv_rejects_negative_amount_with_record_number() {
        let file = temp_file(".csv", &format!("{BOB},{ALICE},1\n{BOB},{ALICE},-1\n"));
        let err = load_transactions(file.path(), false).unwrap_err();
        assert!(err.to_string().contains("record 2"));
    }

    #[test]
    fn test_huge_exponent_amount_is_a_parse_error() {
        let file = temp_file(".csv", &format!("{BOB},{ALICE},1e-2000000000\n"));
        let err = load_transactions(file.path(), false).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("record 1"));

        let content = format!(r#"[{{"to":"{BOB}","from":"{ALICE}","amount":1e2000000000}}]"#);
        let file = temp_file(".json", &content);
        assert!(load_transactions(file.path(), false).unwrap_err().is_parse());
    }

    #[test]
    fn test_csv_rejects_missing_required_columns() {
        let file = temp_file(".csv", &format!("{BOB},{ALICE}\n"));
        let err = load_transactions(file.path(), false).unwrap_err();
        assert!(err.to_string().contains("missing amount"));
    }

    #[test]
    fn test_json_records() {
        let content = serde_json::json!([
            {"to": BOB, "from": ALICE, "amount": 1.5},
            {"to": ALICE, "from": BOB, "amount": "2", "energy_limit": 30000,
             "energy_price": "", "nonce": null},
            {"to": ALICE, "from": BOB, "amount": "0.25", "nonce": "4"}
        ])
        .to_string();
        let file = temp_file(".json", &content);
        let records = load_transactions(file.path(), true).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].amount.to_string(), "1.5");
        assert_eq!(records[1].energy_limit.as_deref(), Some("30000"));
        assert_eq!(records[1].energy_price, None);
        assert_eq!(records[1].nonce, None);
        assert_eq!(records[2].nonce.as_deref(), Some("4"));
    }

    #[test]
    fn test_json_number_keeps_exact_text() {
        let content = format!(r#"[{{"to":"{BOB}","from":"{ALICE}","amount":0.1000000000000000055511151231257827}}]"#);
        let file = temp_file(".json", &content);
        let records = load_transactions(file.path(), false).unwrap();
        assert_eq!(
            records[0].amount.to_smallest_unit().to_string(),
            "100000000000000005"
        );
    }

    #[test]
    fn test_json_rejects_bad_shapes() {
        let file = temp_file(".json", r#"{"to": "x"}"#);
        assert!(load_transactions(file.path(), false).unwrap_err().is_parse());

        let content = format!(r#"[{{"to":"{BOB}","from":"{ALICE}","amount":"1","nonce":true}}]"#);
        let file = temp_file(".json", &content);
        let err = load_transactions(file.path(), false).unwrap_err();
        assert!(err.to_string().contains("nonce must be a string or number"));
    }

    #[test]
    fn test_unknown_extension_and_missing_file() {
        let file = temp_file(".xml", "<txs/>");
        let err = load_transactions(file.path(), false).unwrap_err();
        assert!(err.to_string().contains("unsupported file extension"));

        let err = load_transactions("/nonexistent/dir/txs.csv", false).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_load_signed_transactions() {
        let file = temp_file(".json", r#"["0xaa", "0xbb"]"#);
        assert_eq!(
            load_signed_transactions(file.path()).unwrap(),
            vec!["0xaa".to_string(), "0xbb".to_string()]
        );

        let file = temp_file(".json", r#"[1, 2]"#);
        assert!(load_signed_transactions(file.path()).unwrap_err().is_parse());
    }
}
