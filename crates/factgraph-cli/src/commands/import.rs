//! Import command implementation.

use crate::cli::ImportArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use factgraph_domain::{AnalysisResult, ClaimRecord};
use factgraph_store::SqliteClaimStore;
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};

/// Execute the import command.
pub fn execute_import(
    args: ImportArgs,
    store: &mut SqliteClaimStore,
    default_user: Option<&str>,
    formatter: &Formatter,
) -> Result<()> {
    // Read records from file or stdin
    let json_data = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(file_path) = args.file {
        fs::read_to_string(file_path)?
    } else {
        return Err(CliError::InvalidInput(
            "Must specify either a file or --stdin".to_string(),
        ));
    };

    // Each element is decoded on its own so one bad record cannot sink the batch
    let values: Vec<serde_json::Value> = serde_json::from_str(&json_data)?;
    if values.is_empty() {
        return Err(CliError::InvalidInput("No claim records provided".to_string()));
    }

    let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let mut records = Vec::with_capacity(values.len());
    let mut malformed = 0usize;
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<RecordDefinition>(value) {
            Ok(def) => records.push(def.into_record(default_user, now)?),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed claim record");
                malformed += 1;
            }
        }
    }

    let summary = store.import_claims(&records)?;

    println!("{}", formatter.bulk_result("Imported", summary.inserted));
    if malformed > 0 {
        println!("{}", formatter.warning(&format!("Skipped {} malformed record(s)", malformed)));
    }
    if summary.duplicates > 0 {
        println!(
            "{}",
            formatter.warning(&format!("Skipped {} claim(s) with existing ids", summary.duplicates))
        );
    }

    Ok(())
}

/// Claim record as accepted on import; everything but the text is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordDefinition {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    text: String,
    #[serde(default)]
    created_at: Option<u64>,
    /// Decoded in `into_record`; a malformed analysis leaves the claim unanalysed
    #[serde(default)]
    analysis_result: Option<serde_json::Value>,
}

impl RecordDefinition {
    fn into_record(self, default_user: Option<&str>, now: u64) -> Result<ClaimRecord> {
        let user_id = self
            .user_id
            .or_else(|| default_user.map(str::to_string))
            .ok_or(CliError::NoUser)?;

        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::now_v7().to_string());

        let analysis_result = self
            .analysis_result
            .filter(|value| !value.is_null())
            .and_then(|value| match serde_json::from_value::<AnalysisResult>(value) {
                Ok(analysis) => Some(analysis),
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "Ignoring malformed analysis result");
                    None
                }
            });

        Ok(ClaimRecord {
            id,
            user_id: Some(user_id),
            text: self.text,
            created_at: self.created_at.unwrap_or(now),
            analysis_result,
        })
    }
}
