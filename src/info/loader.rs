use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, LargeListArray, ListArray,
    StringArray,
};
use arrow::datatypes::DataType;
use log::debug;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::{Deserialize, Serialize};

use super::model::{ChannelInfo, ChannelKind, MeasInfo, LOC_LEN};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a channel layout from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – `ch_name`, `kind`, `loc` list column, optional `bad`
/// * `.json`    – `{ "chs": [{ "ch_name", "kind", "loc" }, ...], "bads": [...] }`
/// * `.csv`     – `ch_name`, `kind`, `loc` as semicolon-separated floats, optional `bad`
pub fn load_file(path: &Path) -> Result<MeasInfo> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let info = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;
    debug!(
        "loaded {} channels ({} bad) from {}",
        info.len(),
        info.bads.len(),
        path.display()
    );
    Ok(info)
}

fn check_loc_len(loc: &[f64], row: usize) -> Result<()> {
    if loc.len() > LOC_LEN {
        bail!(
            "Row {row}: location has {} values, at most {LOC_LEN} allowed",
            loc.len()
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct JsonLayout {
    chs: Vec<JsonChannel>,
    #[serde(default)]
    bads: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonChannel {
    ch_name: String,
    kind: String,
    #[serde(default)]
    loc: Vec<Option<f64>>,
}

/// Expected JSON schema:
///
/// ```json
/// {
///   "chs": [
///     { "ch_name": "S1_D1 760", "kind": "fnirs_cw_amplitude",
///       "loc": [0.0, 0.0, 0.0, 0.01, 0.02, 0.0, 0.04, 0.02, 0.0, 760.0, null, null] }
///   ],
///   "bads": ["S1_D1 760"]
/// }
/// ```
fn load_json(path: &Path) -> Result<MeasInfo> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let layout: JsonLayout = serde_json::from_str(&text).context("parsing JSON layout")?;

    let mut chs = Vec::with_capacity(layout.chs.len());
    for (i, ch) in layout.chs.into_iter().enumerate() {
        let loc: Vec<f64> = ch.loc.iter().map(|v| v.unwrap_or(f64::NAN)).collect();
        check_loc_len(&loc, i)?;
        chs.push(ChannelInfo::new(ch.ch_name, ChannelKind::from(ch.kind), &loc));
    }

    Ok(MeasInfo {
        chs,
        bads: layout.bads,
    })
}

/// Write a layout in the JSON schema read by [`load_file`]. NaN locations
/// are written as `null`.
pub fn save_json(info: &MeasInfo, path: &Path) -> Result<()> {
    let layout = JsonLayout {
        chs: info
            .chs
            .iter()
            .map(|ch| JsonChannel {
                ch_name: ch.name.clone(),
                kind: ch.kind.to_string(),
                loc: ch.loc.iter().map(|v| (!v.is_nan()).then_some(*v)).collect(),
            })
            .collect(),
        bads: info.bads.clone(),
    };
    let text = serde_json::to_string_pretty(&layout).context("serializing layout")?;
    std::fs::write(path, text).context("writing JSON file")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with column names.
/// `loc` contains semicolon-separated floats (`nan` for unknown):
///   `"0;0;0;0.01;0.02;0;0.04;0.02;0;760"`
/// `bad` is optional and accepts `true`/`false`/`1`/`0`/empty.
fn load_csv(path: &Path) -> Result<MeasInfo> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let name_idx = column("ch_name").context("CSV missing 'ch_name' column")?;
    let kind_idx = column("kind").context("CSV missing 'kind' column")?;
    let loc_idx = column("loc").context("CSV missing 'loc' column")?;
    let bad_idx = column("bad");

    let mut info = MeasInfo::default();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let name = record.get(name_idx).unwrap_or("").trim().to_string();
        if name.is_empty() {
            bail!("CSV row {row_no}: empty channel name");
        }
        let kind = ChannelKind::from(record.get(kind_idx).unwrap_or(""));
        let loc = parse_semicolon_floats(record.get(loc_idx).unwrap_or(""), row_no)?;
        check_loc_len(&loc, row_no)?;

        if let Some(idx) = bad_idx {
            if parse_flag(record.get(idx).unwrap_or(""), row_no)? {
                info.bads.push(name.clone());
            }
        }
        info.chs.push(ChannelInfo::new(name, kind, &loc));
    }

    Ok(info)
}

fn parse_semicolon_floats(s: &str, row: usize) -> Result<Vec<f64>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(';')
        .enumerate()
        .map(|(j, tok)| {
            tok.trim()
                .parse::<f64>()
                .with_context(|| format!("Row {row}, loc[{j}]: '{tok}' is not a number"))
        })
        .collect()
}

fn parse_flag(s: &str, row: usize) -> Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" => Ok(false),
        "true" | "1" => Ok(true),
        other => bail!("Row {row}: '{other}' is not a valid bad flag"),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing a channel layout.
///
/// Expected schema:
/// - `ch_name`: Utf8 – channel names
/// - `kind`: Utf8 – channel type tags
/// - `loc`: List<Float64> or LargeList<Float64> – location vectors
/// - `bad`: Boolean, optional
fn load_parquet(path: &Path) -> Result<MeasInfo> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut info = MeasInfo::default();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let index_of = |name: &str| {
            schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
        };
        let name_col = batch.column(index_of("ch_name")?);
        let kind_col = batch.column(index_of("kind")?);
        let loc_col = batch.column(index_of("loc")?);
        let bad_col = schema.index_of("bad").ok().map(|i| batch.column(i));

        for row in 0..batch.num_rows() {
            let abs_row = row_offset + row;
            let name = extract_string(name_col, row)
                .with_context(|| format!("Row {abs_row}: failed to read 'ch_name'"))?;
            let kind = extract_string(kind_col, row)
                .with_context(|| format!("Row {abs_row}: failed to read 'kind'"))?;
            let loc = extract_f64_list(loc_col, row)
                .with_context(|| format!("Row {abs_row}: failed to read 'loc'"))?;
            check_loc_len(&loc, abs_row)?;

            if let Some(col) = bad_col {
                if extract_bool(col, row)
                    .with_context(|| format!("Row {abs_row}: failed to read 'bad'"))?
                {
                    info.bads.push(name.clone());
                }
            }
            info.chs
                .push(ChannelInfo::new(name, ChannelKind::from(kind), &loc));
        }
        row_offset += batch.num_rows();
    }

    Ok(info)
}

// -- Parquet / Arrow helpers --

/// Extract a `Vec<f64>` from a List or LargeList column at the given row.
/// Null entries become NaN.
fn extract_f64_list(col: &Arc<dyn Array>, row: usize) -> Result<Vec<f64>> {
    if col.is_null(row) {
        return Ok(Vec::new());
    }

    let values_array = match col.data_type() {
        DataType::List(_) => {
            let list_arr = col
                .as_any()
                .downcast_ref::<ListArray>()
                .context("expected ListArray")?;
            list_arr.value(row)
        }
        DataType::LargeList(_) => {
            let list_arr = col
                .as_any()
                .downcast_ref::<LargeListArray>()
                .context("expected LargeListArray")?;
            list_arr.value(row)
        }
        other => bail!("Expected List or LargeList column, got {other:?}"),
    };

    if let Some(f64_arr) = values_array.as_any().downcast_ref::<Float64Array>() {
        Ok(f64_arr.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    } else if let Some(f32_arr) = values_array.as_any().downcast_ref::<Float32Array>() {
        Ok(f32_arr
            .iter()
            .map(|v| v.map_or(f64::NAN, f64::from))
            .collect())
    } else {
        bail!(
            "List inner type is {:?}, expected Float64 or Float32",
            values_array.data_type()
        )
    }
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let s = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(s.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

fn extract_bool(col: &Arc<dyn Array>, row: usize) -> Result<bool> {
    if col.is_null(row) {
        return Ok(false);
    }
    let arr = col
        .as_any()
        .downcast_ref::<BooleanArray>()
        .with_context(|| format!("Expected Boolean column, got {:?}", col.data_type()))?;
    Ok(arr.value(row))
}
