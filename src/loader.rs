//! CSV loading.
//!
//! Two loaders with different policies are provided:
//! - [`load_tolerant`] skips malformed rows and treats unparseable values as missing;
//! - [`load_strict`] requires a well-formed file with the exact column names.
//!
//! Both follow CSV quoting rules, so a quoted comma does not split a field.

use crate::model::{Dataset, Observation};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};

/// Token identifying a header row in the tolerant loader.
pub const HEADER_TOKEN: &str = "Years";

const N_FIELDS: usize = 4;

/// Parse a numeric field, returning `None` if it is empty or malformed.
pub fn parse_field(field: &str) -> Option<f64> {
    field.trim().parse().ok()
}

/// Load a dataset, tolerating malformed rows and values.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_tolerant<P: AsRef<Path>>(file: P) -> Result<Option<Dataset>> {
    let file = file.as_ref();
    if !file.exists() {
        log::debug!("{file:?} does not exist");
        return Ok(None);
    }
    let reader = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
    let dataset = load_tolerant_from_reader(reader).with_context(|| format!("failed to load {file:?}"))?;
    Ok(Some(dataset))
}

pub fn load_tolerant_from_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut obs_vec = Vec::new();
    for (i_rec, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read record {i_rec}"))?;
        match parse_tolerant_record(&record) {
            Some(obs) => obs_vec.push(obs),
            None => log::debug!("skipped record {i_rec}: {record:?}"),
        }
    }
    log::info!("loaded {} observations", obs_vec.len());

    Ok(Dataset::new(obs_vec))
}

fn parse_tolerant_record(record: &StringRecord) -> Option<Observation> {
    if record.iter().any(|field| field.contains(HEADER_TOKEN)) {
        return None;
    }
    if record.len() != N_FIELDS {
        return None;
    }
    let year = record.get(0).filter(|field| !field.is_empty())?;
    let year = year.parse::<i32>().ok()?;

    Some(Observation {
        year,
        fuel: record.get(1).and_then(parse_field),
        enplanements: record.get(2).and_then(parse_field),
        revenue: record.get(3).and_then(parse_field),
    })
}

#[derive(Debug, Deserialize)]
struct StrictRow {
    #[serde(rename = "Years")]
    year: i32,
    #[serde(rename = "Fuel Consumption")]
    fuel: f64,
    #[serde(rename = "Enplanements")]
    enplanements: f64,
    #[serde(rename = "Revenue Streams")]
    revenue: f64,
}

/// Load a dataset, requiring a header row and a valid value in every field.
///
/// # Errors
/// Returns an error if the file cannot be opened, a column is absent,
/// or any field is missing or malformed.
pub fn load_strict<P: AsRef<Path>>(file: P) -> Result<Dataset> {
    let file = file.as_ref();
    let reader = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
    load_strict_from_reader(reader).with_context(|| format!("failed to load {file:?}"))
}

pub fn load_strict_from_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let mut obs_vec = Vec::new();
    for (i_rec, row) in reader.deserialize::<StrictRow>().enumerate() {
        let row = row.with_context(|| format!("failed to parse record {i_rec}"))?;
        obs_vec.push(Observation::new(
            row.year,
            row.fuel,
            row.enplanements,
            row.revenue,
        ));
    }
    log::info!("loaded {} observations", obs_vec.len());

    Ok(Dataset::new(obs_vec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_field_marks_missing() {
        assert_eq!(parse_field("12.5"), Some(12.5));
        assert_eq!(parse_field(" 3 "), Some(3.0));
        assert_eq!(parse_field(""), None);
        assert_eq!(parse_field("n/a"), None);
    }

    #[test]
    fn tolerant_keeps_rows_with_missing_values() {
        let data = "2020,,100.5,200.5\n";
        let dataset = load_tolerant_from_reader(data.as_bytes()).unwrap();
        assert_eq!(
            dataset.obs_vec,
            vec![Observation {
                year: 2020,
                fuel: None,
                enplanements: Some(100.5),
                revenue: Some(200.5),
            }]
        );
    }

    #[test]
    fn tolerant_skips_header_and_malformed_rows() {
        let data = "Years,Fuel Consumption,Enplanements,Revenue Streams\n\
                    2018,1.0,2.0,3.0\n\
                    2019,1.0,2.0\n\
                    ,1.0,2.0,3.0\n\
                    20x1,1.0,2.0,3.0\n\
                    2020,1.0,2.0,3.0,4.0\n\
                    \n\
                    2021,bad,2.0,3.0\n";
        let dataset = load_tolerant_from_reader(data.as_bytes()).unwrap();
        let years: Vec<_> = dataset.obs_vec.iter().map(|obs| obs.year).collect();
        assert_eq!(years, vec![2018, 2021]);
        assert_eq!(dataset.obs_vec[1].fuel, None);
    }

    #[test]
    fn tolerant_honours_quoted_fields() {
        let data = "2019,\"1,5\",2.0,3.0\n";
        let dataset = load_tolerant_from_reader(data.as_bytes()).unwrap();
        assert_eq!(
            dataset.obs_vec,
            vec![Observation {
                year: 2019,
                fuel: None,
                enplanements: Some(2.0),
                revenue: Some(3.0),
            }]
        );
    }

    #[test]
    fn tolerant_missing_file_is_absent() {
        let dataset = load_tolerant("no/such/dir/data.csv").unwrap();
        assert!(dataset.is_none());
    }

    #[test]
    fn strict_parses_well_formed_file() {
        let data = "Years,Fuel Consumption,Enplanements,Revenue Streams\n\
                    2004,18.2,703.7,134.7\n\
                    2005,18.6,738.6,151.5\n";
        let dataset = load_strict_from_reader(data.as_bytes()).unwrap();
        assert_eq!(
            dataset.obs_vec,
            vec![
                Observation::new(2004, 18.2, 703.7, 134.7),
                Observation::new(2005, 18.6, 738.6, 151.5),
            ]
        );
    }

    #[test]
    fn strict_rejects_missing_values() {
        let data = "Years,Fuel Consumption,Enplanements,Revenue Streams\n\
                    2020,,100.5,200.5\n";
        assert!(load_strict_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn strict_rejects_wrong_columns() {
        let data = "Year,Fuel,Enplanements,Revenue\n2020,1.0,2.0,3.0\n";
        assert!(load_strict_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn strict_missing_file_is_an_error() {
        assert!(load_strict("no/such/dir/data.csv").is_err());
    }
}
