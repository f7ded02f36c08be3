use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::io::{load_eval_inputs, load_sorted_seqs, save_curve, save_ranges, save_values};
use super::types::EvalInputs;
use crate::intersect::intersect_sorted;
use crate::metrics::{AccuracyReport, TopKGroupAccuracy, accuracy_curve};
use crate::slicing::split_n_by_ratios;

#[derive(Debug)]
pub struct FileResult {
    pub path: PathBuf,
    pub rows: usize,
    pub report: AccuracyReport,
    pub t_total: f64,
}

pub fn score_inputs(inputs: &EvalInputs, k: usize) -> Result<AccuracyReport> {
    inputs.validate()?;
    let metric = TopKGroupAccuracy::new(k, inputs.groups())?;
    let (hits, total) = metric.count(&inputs.y_true, &inputs.y_pred);
    Ok(AccuracyReport::new(k, hits, total))
}

fn progress_bar(len: usize, enabled: bool) -> Result<ProgressBar> {
    if !enabled || len < 2 {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} files {msg}")
            .context("progress template")?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Top-K accuracy of each evaluation file.
pub fn run_acc(paths: &[PathBuf], k: usize, progress: bool) -> Result<Vec<FileResult>> {
    let pb = progress_bar(paths.len(), progress)?;
    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        let t0 = Instant::now();
        pb.set_message(path.display().to_string());
        let inputs = load_eval_inputs(path)?;
        let report = score_inputs(&inputs, k)
            .with_context(|| format!("score {}", path.display()))?;
        let t_total = t0.elapsed().as_secs_f64();
        debug!(
            "[acc] {} rows={} hits={} total={} in {:.3}s",
            path.display(),
            inputs.len(),
            report.hits,
            report.total,
            t_total
        );
        if report.total == 0 {
            warn!("[acc] {} has no groups; accuracy undefined", path.display());
        }
        results.push(FileResult {
            path: path.clone(),
            rows: inputs.len(),
            report,
            t_total,
        });
        pb.inc(1);
    }
    pb.finish_and_clear();

    let hits: usize = results.iter().map(|r| r.report.hits).sum();
    let total: usize = results.iter().map(|r| r.report.total).sum();
    info!("[acc] k={} files={} pooled hits={}/{}", k, results.len(), hits, total);
    Ok(results)
}

pub fn run_curve(path: &Path, k_max: usize, out: Option<&Path>) -> Result<Vec<AccuracyReport>> {
    let inputs = load_eval_inputs(path)?;
    let groups = inputs.groups();
    let t0 = Instant::now();
    let curve = accuracy_curve(&groups, k_max, &inputs.y_true, &inputs.y_pred)?;
    info!(
        "[curve] {} groups={} k_max={} in {:.3}s",
        path.display(),
        groups.len(),
        k_max,
        t0.elapsed().as_secs_f64()
    );
    if let Some(out) = out {
        save_curve(out, &curve)?;
        info!("[curve] written to {}", out.display());
    }
    Ok(curve)
}

pub fn run_groups(path: &Path, out: Option<&Path>) -> Result<Vec<Range<usize>>> {
    let inputs = load_eval_inputs(path)?;
    let groups = inputs.groups();
    info!("[groups] {} rows={} groups={}", path.display(), inputs.len(), groups.len());
    if let Some(out) = out {
        save_ranges(out, &groups)?;
        info!("[groups] written to {}", out.display());
    }
    Ok(groups)
}

pub fn run_split(n: usize, ratios: &[u64], out: Option<&Path>) -> Result<Vec<Range<usize>>> {
    let ranges = split_n_by_ratios(n, ratios)?;
    debug!("[split] n={} ratios={:?} -> {:?}", n, ratios, ranges);
    if let Some(out) = out {
        save_ranges(out, &ranges)?;
        info!("[split] written to {}", out.display());
    }
    Ok(ranges)
}

pub fn run_intersect(path: &Path, out: Option<&Path>) -> Result<Vec<i64>> {
    let seqs = load_sorted_seqs(path)?;
    if let Some((seq, pos)) = seqs.first_unsorted() {
        warn!(
            "[intersect] seq{} is not strictly increasing at position {}; result is unspecified",
            seq, pos
        );
    }
    let t0 = Instant::now();
    let values: Vec<i64> = intersect_sorted(&seqs.seqs).copied().collect();
    info!(
        "[intersect] {} seqs={} common={} in {:.3}s",
        path.display(),
        seqs.seqs.len(),
        values.len(),
        t0.elapsed().as_secs_f64()
    );
    if let Some(out) = out {
        save_values(out, &values)?;
        info!("[intersect] written to {}", out.display());
    }
    Ok(values)
}

pub fn format_ranges(ranges: &[Range<usize>]) -> String {
    let parts: Vec<String> = ranges
        .iter()
        .map(|r| format!("[{},{})", r.start, r.end))
        .collect();
    parts.join(" ")
}

pub fn format_report(report: &AccuracyReport) -> String {
    match report.accuracy {
        Some(acc) => format!(
            "k={} hits={} total={} acc={:.6}",
            report.k, report.hits, report.total, acc
        ),
        None => format!("k={} hits=0 total=0 acc=undefined", report.k),
    }
}
