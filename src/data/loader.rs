use std::path::Path;

use anyhow::{Context, Result};

use super::model::{Dataset, Record};
use crate::error::ChartError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a rider dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "Name": ..., "Nationality": ..., "Year": ..., "Time": "MM:SS", "Doping": ... }, ...]`
/// * `.csv`  – header row using the same column names
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading JSON file {}", path.display()))?;
            parse_json_records(&text)?
        }
        "csv" => {
            let reader = csv::Reader::from_path(path)
                .with_context(|| format!("opening CSV file {}", path.display()))?;
            read_csv_records(reader)?
        }
        other => return Err(ChartError::UnsupportedFormat(other.to_string()).into()),
    };

    let dataset = Dataset::from_records(records)
        .with_context(|| format!("validating records from {}", path.display()))?;
    log::debug!("Parsed {} records from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Parse and validate an in-memory JSON document.
pub fn parse_json(text: &str) -> Result<Dataset> {
    let records = parse_json_records(text)?;
    Ok(Dataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (one object per rider):
///
/// ```json
/// [
///   {
///     "Time": "36:50",
///     "Place": 1,
///     "Seconds": 2210,
///     "Name": "Rider 01",
///     "Year": 1995,
///     "Nationality": "ITA",
///     "Doping": "Alleged drug use during 1995 due to high hematocrit levels",
///     "URL": "..."
///   },
///   ...
/// ]
/// ```
fn parse_json_records(text: &str) -> Result<Vec<Record>> {
    let records: Vec<Record> =
        serde_json::from_str(text).context("parsing JSON: expected a top-level array of riders")?;
    Ok(records)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv_records<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Record>> {
    reader
        .deserialize::<Record>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_JSON: &str = r#"[
        {"Time":"36:50","Place":1,"Seconds":2210,"Name":"Rider 01","Year":1995,
         "Nationality":"ITA","Doping":"Alleged drug use during 1995 due to high hematocrit levels",
         "URL":"https://example.org/rider-01"},
        {"Time":"39:40","Place":35,"Seconds":2380,"Name":"Some Rider","Year":2007,
         "Nationality":"FRA","Doping":"","URL":""}
    ]"#;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_json_records() {
        let ds = parse_json(SAMPLE_JSON).unwrap();
        assert_eq!(ds.len(), 2);
        let first = &ds.records()[0];
        assert_eq!(first.name, "Rider 01");
        assert_eq!(first.year, 1995);
        assert_eq!(first.seconds, Some(2210));
        assert!(first.has_allegation());
        assert!(!ds.records()[1].has_allegation());
        assert_eq!(ds.time(1).unwrap().to_string(), "39:40");
    }

    #[test]
    fn rejects_non_array_json() {
        assert!(parse_json(r#"{"Name":"x"}"#).is_err());
    }

    #[test]
    fn rejects_bad_time_in_json() {
        let err = parse_json(
            r#"[{"Name":"A","Nationality":"B","Year":2000,"Time":"not a time","Doping":""}]"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("not a time"));
    }

    #[test]
    fn loads_json_file() {
        let file = write_temp(".json", SAMPLE_JSON);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.year_extent(), (1995, 2007));
    }

    #[test]
    fn loads_csv_file() {
        let file = write_temp(
            ".csv",
            "Name,Nationality,Year,Time,Doping,Seconds\n\
             Rider 01,ITA,1995,36:50,Alleged drug use,2210\n\
             Some Rider,FRA,2007,39:40,,2380\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].doping, "Alleged drug use");
        assert_eq!(ds.records()[1].doping, "");
        assert_eq!(ds.records()[1].place, None);
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = write_temp(".xml", "<riders/>");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported file extension"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_file(Path::new("/definitely/not/here.json")).is_err());
    }
}
