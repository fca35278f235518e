use super::{RawItem, RawTransaction, TransactionDb};
use crate::error::{HfResult, HuiForgeError};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use strum_macros::{Display, EnumString};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> HfResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                HuiForgeError::Config(format!(
                    "Cannot infer input format of '{}' (expected .json or .csv)",
                    path.display()
                ))
            })?;
        ext.parse().map_err(|_| {
            HuiForgeError::Config(format!("Unsupported input format '.{}'", ext))
        })
    }
}

const CSV_HEADER: [&str; 4] = ["tid", "item", "quantity", "profit"];

#[derive(Debug, Deserialize)]
struct CsvRow {
    tid: String,
    item: String,
    quantity: u32,
    profit: i64,
}

/// Reads a JSON array of `{"TID", "items", "quantities", "profit"}` objects.
/// Unknown fields and wrongly typed values are rejected.
pub fn read_json<R: Read>(reader: R) -> HfResult<Vec<RawTransaction>> {
    let raw: Vec<RawTransaction> = serde_json::from_reader(reader)?;
    Ok(raw)
}

/// Reads long-format CSV (`tid,item,quantity,profit`), one row per entry.
/// Rows sharing a TID are grouped in order of first appearance.
pub fn read_csv<R: Read>(reader: R) -> HfResult<Vec<RawTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let found: Vec<String> = headers.iter().map(|h| h.to_ascii_lowercase()).collect();
    if found != CSV_HEADER {
        return Err(HuiForgeError::Config(format!(
            "CSV header must be '{}', found '{}'",
            CSV_HEADER.join(","),
            found.join(",")
        )));
    }

    let mut transactions: Vec<RawTransaction> = Vec::new();
    let mut by_tid: HashMap<String, usize> = HashMap::new();

    for result in rdr.deserialize() {
        let row: CsvRow = result?;
        let slot = *by_tid.entry(row.tid.clone()).or_insert_with(|| {
            transactions.push(RawTransaction {
                tid: row.tid.clone(),
                items: Vec::new(),
                quantities: Vec::new(),
                profits: Vec::new(),
            });
            transactions.len() - 1
        });
        let t = &mut transactions[slot];
        t.items.push(RawItem::Label(row.item));
        t.quantities.push(row.quantity);
        t.profits.push(row.profit);
    }

    debug!("CSV: grouped rows into {} transactions", transactions.len());
    Ok(transactions)
}

pub fn load_database<P: AsRef<Path>>(path: P) -> HfResult<TransactionDb> {
    let path = path.as_ref();
    let format = InputFormat::from_path(path)?;
    info!("Loading {} database from {}", format, path.display());

    let reader = BufReader::new(File::open(path)?);
    let raw = match format {
        InputFormat::Json => read_json(reader)?,
        InputFormat::Csv => read_csv(reader)?,
    };

    let db = TransactionDb::new(raw)?;
    info!(
        "Loaded {} transactions over {} distinct items",
        db.len(),
        db.item_count()
    );
    Ok(db)
}
