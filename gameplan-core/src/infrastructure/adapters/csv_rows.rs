// gameplan-core/src/infrastructure/adapters/csv_rows.rs
//
// CSV upload -> typed rows. Header matching is delegated to `Field`.

use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, instrument};

use crate::domain::rules::GamePlanRow;
use crate::infrastructure::error::InfrastructureError;

#[instrument]
pub fn read_rows(path: &Path) -> Result<Vec<GamePlanRow>, InfrastructureError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => {}
        other => {
            return Err(InfrastructureError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            ));
        }
    }
    let file = File::open(path)?;
    let rows = parse_rows(file)?;
    debug!(rows = rows.len(), "upload parsed");
    Ok(rows)
}

pub fn parse_rows<R: Read>(input: R) -> Result<Vec<GamePlanRow>, InfrastructureError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // lignes de longueur variable tolérées
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;

        // Lignes entièrement vides ignorées
        if record.iter().all(|v| v.trim().is_empty()) {
            continue;
        }

        let pairs = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.as_str(), value));
        rows.push(GamePlanRow::from_record(pairs));
    }

    Ok(rows)
}
