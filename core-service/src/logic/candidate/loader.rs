//! CSV candidate source
//!
//! Reads a header-row CSV into an ordered list of candidate records.
//! A missing file is an empty source, not an error.

use std::io::Read;
use std::path::Path;

use super::types::CandidateRecord;
use super::CandidateError;

/// Load candidates from a CSV file
pub fn load_candidates(path: &Path) -> Result<Vec<CandidateRecord>, CandidateError> {
    if !path.exists() {
        log::warn!("Candidate file not found: {}", path.display());
        return Ok(Vec::new());
    }

    let file = std::fs::File::open(path).map_err(|e| CandidateError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let candidates = read_candidates(file)?;
    log::info!("Loaded {} candidates from {}", candidates.len(), path.display());
    Ok(candidates)
}

/// Parse candidates from any CSV reader
pub fn read_candidates<R: Read>(source: R) -> Result<Vec<CandidateRecord>, CandidateError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| CandidateError::Csv { row: 0, message: e.to_string() })?
        .clone();

    let mut candidates = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = result.map_err(|e| CandidateError::Csv {
            row: idx + 1,
            message: e.to_string(),
        })?;

        let mut record = CandidateRecord::new();
        for (col, name) in headers.iter().enumerate() {
            // Short rows leave trailing columns absent
            record.insert(name, row.get(col).map(str::to_string));
        }
        candidates.push(record);
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_preserves_columns_and_values() {
        let data = "name,skills,years_of_experience\nAda,\"Python, SQL\",5\nGrace,COBOL,\n";
        let candidates = read_candidates(data.as_bytes()).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].get("skills"), Some("Python, SQL"));
        assert_eq!(candidates[0].get("years_of_experience"), Some("5"));
        assert_eq!(candidates[1].get("years_of_experience"), Some(""));

        let names: Vec<_> = candidates[0].iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["name", "skills", "years_of_experience"]);
    }

    #[test]
    fn test_short_rows_leave_fields_absent() {
        let data = "name,skills,education\nAda,Rust\n";
        let candidates = read_candidates(data.as_bytes()).unwrap();

        assert!(candidates[0].contains("education"));
        assert_eq!(candidates[0].get("education"), None);
    }

    #[test]
    fn test_missing_file_is_empty_source() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = load_candidates(&dir.path().join("nope.csv")).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "name,skills").unwrap();
        writeln!(file, "Ada,Rust").unwrap();
        drop(file);

        let candidates = load_candidates(&path).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].label(), "Ada");
    }
}
