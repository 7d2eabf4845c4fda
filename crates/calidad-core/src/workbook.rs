use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};
use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::CalidadError;
use crate::model::{RawCell, RawMeasurement};
use crate::regulation::{RawRegulationRow, RegulationTable};

pub const MEASUREMENT_SHEET: &str = "datos";
/// Regulation sheet names, in order of preference.
pub const REGULATION_SHEETS: [&str; 2] = ["eca", "lmp"];

const MEASUREMENT_COLUMNS: [&str; 5] = ["parametro", "unidad", "estacion", "fecha", "valor"];
const REGULATION_KEY_COLUMNS: [&str; 2] = ["parametro", "unidad"];

/// Raw contents of a monitoring workbook, before normalization.
#[derive(Debug, Clone)]
pub struct LoadedWorkbook {
    pub measurements: Vec<RawMeasurement>,
    pub regulation: RegulationTable,
    /// Which regulation sheet was read (`eca` or `lmp`).
    pub regulation_sheet: String,
}

/// Load a monitoring workbook from xlsx bytes.
///
/// The workbook must contain a `datos` sheet and an `eca` (or `lmp`)
/// sheet; the first row of each is the header.
pub fn load_workbook(bytes: &[u8]) -> Result<LoadedWorkbook, CalidadError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<Cursor<&[u8]>> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| CalidadError::Workbook(format!("{e}")))?;

    let sheet_names = workbook.sheet_names();
    if !sheet_names.iter().any(|s| s == MEASUREMENT_SHEET) {
        return Err(CalidadError::InputSchema(
            "El archivo debe contener la hoja 'datos'.".into(),
        ));
    }
    let regulation_sheet = REGULATION_SHEETS
        .iter()
        .find(|name| sheet_names.iter().any(|s| s == *name))
        .ok_or_else(|| {
            CalidadError::InputSchema("El archivo debe contener una hoja 'eca' o 'lmp'.".into())
        })?
        .to_string();

    let datos = workbook
        .worksheet_range(MEASUREMENT_SHEET)
        .map_err(|e| CalidadError::Workbook(format!("{e}")))?;
    let regulation = workbook
        .worksheet_range(&regulation_sheet)
        .map_err(|e| CalidadError::Workbook(format!("{e}")))?;

    let measurements = read_measurements(&datos)?;
    let regulation = read_regulation(&regulation)?;
    tracing::info!(
        measurements = measurements.len(),
        regulation_rows = regulation.rows().len(),
        threshold_columns = regulation.columns().len(),
        sheet = %regulation_sheet,
        "loaded workbook"
    );

    Ok(LoadedWorkbook {
        measurements,
        regulation,
        regulation_sheet,
    })
}

/// Read the measurement sheet. Fully empty rows are skipped.
pub fn read_measurements(range: &Range<Data>) -> Result<Vec<RawMeasurement>, CalidadError> {
    let mut rows = range.rows();
    let headers = rows.next().map(header_names).unwrap_or_default();
    let index = require_columns(&headers, &MEASUREMENT_COLUMNS)?;
    let [parameter, unit, station, date, value] = [index[0], index[1], index[2], index[3], index[4]];

    let measurements = rows
        .filter(|row| !is_blank(row))
        .map(|row| RawMeasurement {
            parameter: cell_text(row.get(parameter)),
            unit: cell_text(row.get(unit)),
            station: cell_text(row.get(station)),
            date: row.get(date).and_then(cell_date),
            value: row.get(value).map(raw_cell).unwrap_or(RawCell::Empty),
        })
        .collect();
    Ok(measurements)
}

/// Read the regulation sheet. Every header besides the key columns is a
/// candidate threshold column.
pub fn read_regulation(range: &Range<Data>) -> Result<RegulationTable, CalidadError> {
    let mut rows = range.rows();
    let headers = rows.next().map(header_names).unwrap_or_default();
    let index = require_columns(&headers, &REGULATION_KEY_COLUMNS)?;

    let raw_rows: Vec<RawRegulationRow> = rows
        .filter(|row| !is_blank(row))
        .map(|row| RawRegulationRow {
            parameter: cell_text(row.get(index[0])),
            unit: cell_text(row.get(index[1])),
            cells: (0..headers.len())
                .map(|i| row.get(i).map(raw_cell).unwrap_or(RawCell::Empty))
                .collect(),
        })
        .collect();

    Ok(RegulationTable::from_raw(&headers, &raw_rows))
}

fn header_names(row: &[Data]) -> Vec<String> {
    row.iter().map(|c| cell_text(Some(c))).collect()
}

/// Position of each required column; header matching ignores case.
fn require_columns(headers: &[String], required: &[&str]) -> Result<Vec<usize>, CalidadError> {
    let mut found = Vec::with_capacity(required.len());
    let mut missing = Vec::new();
    for name in required {
        match headers.iter().position(|h| h.eq_ignore_ascii_case(name)) {
            Some(i) => found.push(i),
            None => missing.push(*name),
        }
    }
    if !missing.is_empty() {
        return Err(CalidadError::InputSchema(format!(
            "Faltan columnas requeridas: {}.",
            missing.join(", ")
        )));
    }
    Ok(found)
}

fn is_blank(row: &[Data]) -> bool {
    row.iter().all(|c| match c {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    })
}

fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty) | Some(Data::Error(_)) => String::new(),
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) => f.to_string(),
        Some(Data::Int(i)) => i.to_string(),
        Some(other) => format!("{other}"),
    }
}

fn raw_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::String(s) if s.trim().is_empty() => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Empty | Data::Error(_) => RawCell::Empty,
        other => RawCell::Text(format!("{other}")),
    }
}

/// Date of a cell; anything unreadable becomes `None`, the row is kept.
fn cell_date(cell: &Data) -> Option<NaiveDateTime> {
    match cell {
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64()),
        Data::Float(f) => excel_serial_to_datetime(*f),
        Data::Int(i) => excel_serial_to_datetime(*i as f64),
        Data::String(s) | Data::DateTimeIso(s) => parse_date_text(s),
        _ => None,
    }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` (or ISO `T`) and `DD/MM/YYYY`.
pub fn parse_date_text(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%d/%m/%Y %H:%M:%S"];
    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Excel serial date (1900 system, day 0 = 1899-12-30) to a timestamp.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    // 2958465 is 9999-12-31.
    if !serial.is_finite() || serial < 1.0 || serial >= 2_958_466.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}
