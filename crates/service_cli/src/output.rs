//! Result rendering for the table, JSON and CSV output formats.

use std::fmt::Display;
use std::io::Write;

use sampler_core::EngineKind;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// A batch of sampled values with the settings that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct SampleReport<T> {
    /// Subcommand that produced the values
    pub command: &'static str,
    /// Engine family used
    pub engine: EngineKind,
    /// Seed, if the run was deterministic
    pub seed: Option<u64>,
    /// What was sampled, e.g. `uniform i64 [0, 10]`
    pub source: String,
    /// Drawn values in order
    pub values: Vec<T>,
}

/// Writes `report` to `out` in the requested format.
pub fn render_values<T, W>(report: &SampleReport<T>, format: OutputFormat, out: &mut W) -> Result<()>
where
    T: Serialize + Display,
    W: Write,
{
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "index,value")?;
            for (i, v) in report.values.iter().enumerate() {
                writeln!(out, "{},{}", i, v)?;
            }
        }
        OutputFormat::Table => {
            let seed = report
                .seed
                .map_or_else(|| "entropy".to_string(), |s| s.to_string());
            writeln!(
                out,
                "{} ({} engine, seed: {})",
                report.source, report.engine, seed
            )?;
            let cells: Vec<String> = report.values.iter().map(|v| v.to_string()).collect();
            let width = cells.iter().map(String::len).max().unwrap_or(0).max(5);
            let index_width = report.values.len().to_string().len().max(5);
            write_table(
                out,
                &[("Index", index_width), ("Value", width)],
                cells
                    .iter()
                    .enumerate()
                    .map(|(i, c)| vec![i.to_string(), c.clone()]),
            )?;
        }
    }
    Ok(())
}

/// Writes a key/value summary; JSON output serialises `value` instead.
pub fn render_summary<S, W>(
    rows: &[(&str, String)],
    value: &S,
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    S: Serialize,
    W: Write,
{
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "key,value")?;
            for (k, v) in rows {
                writeln!(out, "{},{}", k, v)?;
            }
        }
        OutputFormat::Table => {
            let key_width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0).max(3);
            let value_width = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0).max(5);
            write_table(
                out,
                &[("Key", key_width), ("Value", value_width)],
                rows.iter().map(|(k, v)| vec![k.to_string(), v.clone()]),
            )?;
        }
    }
    Ok(())
}

fn write_table<W, I>(out: &mut W, columns: &[(&str, usize)], rows: I) -> Result<()>
where
    W: Write,
    I: Iterator<Item = Vec<String>>,
{
    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = columns.iter().map(|(_, w)| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(mid), right)
    };
    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(columns)
            .map(|(c, (_, w))| format!(" {:<w$} ", c, w = *w))
            .collect();
        format!("│{}│", padded.join("│"))
    };

    let headers: Vec<String> = columns.iter().map(|(h, _)| h.to_string()).collect();
    writeln!(out, "{}", rule("┌", "┬", "┐"))?;
    writeln!(out, "{}", line(&headers))?;
    writeln!(out, "{}", rule("├", "┼", "┤"))?;
    for row in rows {
        writeln!(out, "{}", line(&row))?;
    }
    writeln!(out, "{}", rule("└", "┴", "┘"))?;
    Ok(())
}
