use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{BooleanArray, Float64Builder, ListBuilder, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const WAVELENGTHS: [f64; 2] = [760.0, 850.0];

/// Optode positions on a flat patch, in metres.
fn source_xyz(s: u32) -> [f64; 3] {
    [0.03 * f64::from(s - 1), 0.0, 0.0]
}

fn detector_xyz(d: u32) -> [f64; 3] {
    [0.03 * f64::from(d - 1), 0.03, 0.0]
}

fn location(source: [f64; 3], detector: [f64; 3], wavelength: f64) -> Vec<f64> {
    let mut loc: Vec<f64> = source
        .iter()
        .zip(detector.iter())
        .map(|(s, d)| (s + d) / 2.0)
        .collect();
    loc.extend_from_slice(&source);
    loc.extend_from_slice(&detector);
    loc.push(wavelength);
    loc.extend_from_slice(&[f64::NAN, f64::NAN]);
    loc
}

fn main() -> Result<()> {
    let mut names: Vec<String> = Vec::new();
    let mut locs: Vec<Vec<f64>> = Vec::new();

    // Long channels: every source with every detector (2 x 2).
    let mut pairs: Vec<(u32, u32, [f64; 3], [f64; 3])> = Vec::new();
    for s in 1..=2 {
        for d in 1..=2 {
            pairs.push((s, d, source_xyz(s), detector_xyz(d)));
        }
    }
    // One short channel: detector 3 sits 8 mm from source 1.
    pairs.push((1, 3, source_xyz(1), [0.008, 0.0, 0.0]));

    for (s, d, src, det) in &pairs {
        for wl in WAVELENGTHS {
            names.push(format!("S{s}_D{d} {wl}"));
            locs.push(location(*src, *det, wl));
        }
    }

    // S2_D2 is flagged bad on both wavelengths.
    let bads: Vec<bool> = names.iter().map(|n| n.starts_with("S2_D2 ")).collect();
    let kinds = vec!["fnirs_cw_amplitude"; names.len()];

    let mut loc_builder = ListBuilder::new(Float64Builder::new());
    for row in &locs {
        let values = loc_builder.values();
        for &v in row {
            if v.is_nan() {
                values.append_null();
            } else {
                values.append_value(v);
            }
        }
        loc_builder.append(true);
    }
    let loc_array = loc_builder.finish();

    let schema = Arc::new(Schema::new(vec![
        Field::new("ch_name", DataType::Utf8, false),
        Field::new("kind", DataType::Utf8, false),
        Field::new(
            "loc",
            DataType::List(Arc::new(Field::new("item", DataType::Float64, true))),
            false,
        ),
        Field::new("bad", DataType::Boolean, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                names.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(kinds)),
            Arc::new(loc_array),
            Arc::new(BooleanArray::from(bads)),
        ],
    )
    .context("building record batch")?;

    let output_path = "sample_layout.parquet";
    let file = std::fs::File::create(output_path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;

    println!("Wrote {} channels ({} pairs) to {output_path}", names.len(), pairs.len());
    Ok(())
}
