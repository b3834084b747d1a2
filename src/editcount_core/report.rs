use crate::editcount_core::config::OutputFormat;
use crate::editcount_core::error::Result;
use crate::editcount_core::persist::write_atomic;
use crate::editcount_core::reconcile::Report;
use std::path::Path;

/// Render the report as it is written to disk.
pub fn render_report(report: &Report, format: &OutputFormat) -> Result<String> {
    let json = serde_json::to_string(report)?;
    Ok(match format {
        OutputFormat::Script { var_name } => format!("var {}={};", var_name, json),
        OutputFormat::Json => json,
    })
}

/// Overwrite `path` with the rendered report.
pub fn write_report(report: &Report, path: &Path, format: &OutputFormat) -> Result<()> {
    let contents = render_report(report, format)?;
    write_atomic(path, contents.as_bytes())?;
    log::info!("Wrote report to {}", path.display());
    Ok(())
}

/// Human readable summary, one line per album grouped by year.
pub fn format_summary(report: &Report) -> String {
    let mut out = String::new();

    for year in &report.years {
        out.push_str(&format!("{}\n", year.year));
        for album in &year.albums {
            let mark = if album.is_complete() { '✓' } else { ' ' };
            out.push_str(&format!(
                "  {} {:<32} {:>5}/{:<5}/{:<5}\n",
                mark, album.album, album.edited, album.deleted, album.total
            ));
        }
    }

    let totals = report.totals();
    out.push_str("─────────────────────────────────\n");
    out.push_str(&format!(
        "{} albums ({} complete)\n",
        totals.albums, totals.complete
    ));
    out.push_str(&format!(
        "Edited/deleted/total: {}/{}/{}\n",
        totals.edited, totals.deleted, totals.total
    ));

    out
}
