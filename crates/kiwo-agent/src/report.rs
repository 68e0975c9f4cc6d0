//! Plain-text summary printed after a scoring run.

use std::fmt::Write;

use kiwo_advisor::{recommend, Language};
use kiwo_ranker::{ScoredDataset, ScoredPlot};

pub struct ReportOptions<'a> {
    pub top_n: usize,
    pub language: Language,
    /// Plot to advise on; the first plot when `None`.
    pub plot: Option<&'a str>,
}

pub fn render_summary(scored: &ScoredDataset, opts: &ReportOptions<'_>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_summary(&mut out, scored, opts);
    out
}

fn write_summary(out: &mut String, scored: &ScoredDataset, opts: &ReportOptions<'_>) -> std::fmt::Result {
    writeln!(out, "Run {}: {} plots scored", scored.run_id, scored.len())?;
    let w = &scored.weights;
    writeln!(
        out,
        "Weights: biomass={} shrub={} grazing={} woody={}",
        w.biomass, w.shrub, w.grazing, w.woody
    )?;

    writeln!(out, "\nDiagnoses:")?;
    for (diagnosis, count) in scored.diagnosis_counts() {
        if count > 0 {
            writeln!(out, "  {count:>4}  {diagnosis}")?;
        }
    }

    writeln!(out, "\nTop {} plots:", opts.top_n)?;
    for row in scored.top(opts.top_n) {
        write_row(out, row)?;
    }
    writeln!(out, "\nBottom {} plots:", opts.top_n)?;
    for row in scored.bottom(opts.top_n) {
        write_row(out, row)?;
    }

    let selected = match opts.plot {
        Some(name) => scored.find_plot(name),
        None => scored.rows().first(),
    };
    match (selected, opts.plot) {
        (Some(row), _) => {
            writeln!(out, "\nAdvice for '{}' ({}):", row.plot_name(), opts.language)?;
            writeln!(out, "  {}", recommend(row.gss(), opts.language))?;
        }
        (None, Some(name)) => writeln!(out, "\nNo plot named '{name}'")?,
        (None, None) => {}
    }
    Ok(())
}

fn write_row(out: &mut String, row: &ScoredPlot) -> std::fmt::Result {
    writeln!(out, "  {:<24} {:.3}  {}", row.plot_name(), row.gss(), row.diagnosis())
}
