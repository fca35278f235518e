use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuiForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Malformed Transaction '{tid}': {reason}")]
    MalformedTransaction { tid: String, reason: String },

    #[error("Invalid Parameter: {0}")]
    InvalidParameter(String),

    /// A bound came out below the exact utility of an itemset it covers.
    /// Only reachable through an arithmetic bug in the bound calculator.
    #[error("Unsound Bound: bound {bound} < utility {utility} for itemset {itemset}")]
    UnsoundBound {
        bound: i64,
        utility: i64,
        itemset: String,
    },
}

impl HuiForgeError {
    pub fn malformed(tid: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTransaction {
            tid: tid.to_string(),
            reason: reason.into(),
        }
    }
}

pub type HfResult<T> = Result<T, HuiForgeError>;
