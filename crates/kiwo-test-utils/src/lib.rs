//! Shared test fixtures: plot tables, random datasets and temporary CSV files.

use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::NamedTempFile;

use kiwo_common::schema::{LATITUDE, LONGITUDE, REQUIRED_COLUMNS};
use kiwo_common::PlotTable;

pub use pretty_assertions;

/// CSV text of a small survey: six plots, coordinates and a free-text column.
pub const SAMPLE_CSV: &str = "\
Plot Name,available_biomass,Shrub %,grazing_pressure,total woody count,latitude,longitude,surveyor
Kofar Gabas,1250.5,12,0.8,14,12.0022,8.5919,Aisha
Dutsen Rafi,430,68,2.9,61,11.9875,8.6012,Musa
Rijiyar Lemo,980,25,1.1,22,12.0201,8.5233,Aisha
Tudun Wada,210,85,3.4,90,11.9650,8.4981,
Gidan Dan Hausa,1500,5,0.5,8,,,Musa
Sabon Gari,760,40,2.0,35,12.0409,8.5540,Bala
";

/// Header of a table holding only the required columns.
pub fn required_header() -> Vec<&'static str> {
    REQUIRED_COLUMNS.to_vec()
}

/// Table with only the required columns and the given rows
/// (`name, biomass, shrub, grazing, woody`).
pub fn table_from_rows(rows: &[(&str, f64, f64, f64, f64)]) -> PlotTable {
    rows.iter().fold(PlotTable::new(required_header()), |table, (name, b, s, g, w)| {
        table.with_row([
            name.to_string(),
            b.to_string(),
            s.to_string(),
            g.to_string(),
            w.to_string(),
        ])
    })
}

/// The [`SAMPLE_CSV`] survey as an in-memory table.
pub fn sample_table() -> PlotTable {
    let mut lines = SAMPLE_CSV.lines();
    let header: Vec<&str> = lines.next().unwrap_or_default().split(',').collect();
    let mut table = PlotTable::new(header);
    for line in lines {
        table.push_row(line.split(',').map(|c| Some(c.to_string())));
    }
    table
}

/// Deterministic pseudo-random table with `n` plots and coordinates.
pub fn random_table(seed: u64, n: usize) -> PlotTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut header = required_header();
    header.extend([LATITUDE, LONGITUDE]);
    let mut table = PlotTable::new(header);
    for i in 0..n {
        table = table.with_row([
            format!("Plot {i}"),
            format!("{:.2}", rng.gen_range(0.0..2000.0)),
            format!("{:.1}", rng.gen_range(0.0..100.0)),
            format!("{:.2}", rng.gen_range(0.0..5.0)),
            rng.gen_range(0..150u32).to_string(),
            format!("{:.4}", rng.gen_range(10.0..13.0)),
            format!("{:.4}", rng.gen_range(7.0..10.0)),
        ]);
    }
    table
}

/// Write `contents` to a temporary `.csv` file that lives as long as the handle.
pub fn temp_csv(contents: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}
