use crate::report::model::{ReportFormat, ScanReport};
use anyhow::{bail, Context};
use chrono::DateTime;
use geolifecore::analysis::{Bounds, UserSummary};
use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

fn describe_time(seconds: i64) -> String {
    match DateTime::from_timestamp(seconds, 0) {
        Some(at) => format!("{} ({})", seconds, at.format("%Y-%m-%d %H:%M:%S")),
        None => seconds.to_string(),
    }
}

fn write_bounds(out: &mut String, indent: &str, bounds: &Bounds) {
    match bounds.extent() {
        Some(extent) => {
            let _ = writeln!(out, "{}minX: {}", indent, extent.min_x);
            let _ = writeln!(out, "{}maxX: {}", indent, extent.max_x);
            let _ = writeln!(out, "{}minY: {}", indent, extent.min_y);
            let _ = writeln!(out, "{}maxY: {}", indent, extent.max_y);
            let _ = writeln!(out, "{}minTime: {}", indent, describe_time(extent.min_time));
            let _ = writeln!(out, "{}maxTime: {}", indent, describe_time(extent.max_time));
        }
        None => {
            let _ = writeln!(out, "{}no records observed", indent);
        }
    }
}

fn write_user(out: &mut String, user: &UserSummary, per_file: bool) {
    let _ = writeln!(
        out,
        "User {}: {} files, {} records ({} kept)",
        user.user_id,
        user.files.len(),
        user.records_read(),
        user.records_kept()
    );
    if per_file {
        for file in &user.files {
            let _ = writeln!(out, "  User {} file {}: {} records", user.user_id, file.name, file.records);
            write_bounds(out, "    ", &file.bounds);
        }
    }
    let _ = writeln!(out, "Statistics for GeoLife user {}", user.user_id);
    write_bounds(out, "  ", &user.bounds);
}

fn render_text(report: &ScanReport, per_file: bool) -> String {
    let mut out = String::new();
    for user in &report.users {
        write_user(&mut out, user, per_file);
    }
    for failure in &report.failures {
        let _ = writeln!(out, "User {} failed: {}", failure.user_id, failure.error);
    }
    if report.users.len() > 1 {
        let _ = writeln!(
            out,
            "Combined bounds over {} users ({} records)",
            report.users.len(),
            report.records_kept()
        );
        write_bounds(&mut out, "  ", &report.combined);
    }
    out
}

/// Header line of a ONE external-movement trace: `minTime maxTime minX maxX minY maxY`.
fn render_one(report: &ScanReport) -> anyhow::Result<String> {
    let Some(extent) = report.combined.extent() else {
        bail!("no records observed; cannot write a movement header");
    };
    Ok(format!(
        "{} {} {} {} {} {}\n",
        extent.min_time, extent.max_time, extent.min_x, extent.max_x, extent.min_y, extent.max_y
    ))
}

pub fn render(report: &ScanReport, format: ReportFormat, per_file: bool) -> anyhow::Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(report, per_file)),
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(report).context("serializing report")?;
            json.push('\n');
            Ok(json)
        }
        ReportFormat::One => render_one(report),
    }
}

/// Appends the rendered report to `path`, creating parent directories.
pub fn append_to_file(rendered: &str, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening report file {}", path.display()))?;
    file.write_all(rendered.as_bytes())
        .with_context(|| format!("writing report file {}", path.display()))?;
    Ok(())
}
