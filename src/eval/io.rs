use anyhow::{Context, Result, bail};
use ndarray::Array1;
use ndarray_npy::{NpzReader, NpzWriter};
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::ops::Range;
use std::path::Path;

use super::types::{EvalInputs, SortedSeqs};
use crate::metrics::AccuracyReport;

fn read_i64<R: Read + Seek>(npz: &mut NpzReader<R>, name: &str) -> Result<Array1<i64>> {
    let arr: Array1<i64> = npz
        .by_name(name)
        .with_context(|| format!("missing {}", name))?;
    Ok(arr)
}
fn read_f64<R: Read + Seek>(npz: &mut NpzReader<R>, name: &str) -> Result<Array1<f64>> {
    let arr: Array1<f64> = npz
        .by_name(name)
        .with_context(|| format!("missing {}", name))?;
    Ok(arr)
}

fn open_npz(path: &Path) -> Result<NpzReader<File>> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    NpzReader::new(f).with_context(|| format!("read npz {}", path.display()))
}

fn create_npz(path: &Path) -> Result<NpzWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    Ok(NpzWriter::new(f))
}

fn to_i64(values: impl IntoIterator<Item = usize>) -> Result<Array1<i64>> {
    let v = values
        .into_iter()
        .map(|x| i64::try_from(x).context("index does not fit in i64"))
        .collect::<Result<Vec<i64>>>()?;
    Ok(Array1::from_vec(v))
}

pub fn load_eval_inputs(path: &Path) -> Result<EvalInputs> {
    let mut npz = open_npz(path)?;
    let inputs = EvalInputs {
        group_ids: read_i64(&mut npz, "group_ids.npy")?.to_vec(),
        y_true: read_f64(&mut npz, "y_true.npy")?.to_vec(),
        y_pred: read_f64(&mut npz, "y_pred.npy")?.to_vec(),
    };
    inputs
        .validate()
        .with_context(|| format!("inconsistent inputs in {}", path.display()))?;
    Ok(inputs)
}

pub fn save_eval_inputs(path: &Path, inputs: &EvalInputs) -> Result<()> {
    let mut npz = create_npz(path)?;
    npz.add_array("group_ids.npy", &Array1::from_vec(inputs.group_ids.clone()))?;
    npz.add_array("y_true.npy", &Array1::from_vec(inputs.y_true.clone()))?;
    npz.add_array("y_pred.npy", &Array1::from_vec(inputs.y_pred.clone()))?;
    finish(npz)
}

pub fn load_sorted_seqs(path: &Path) -> Result<SortedSeqs> {
    let mut npz = open_npz(path)?;
    let meta = read_i64(&mut npz, "meta_n_seqs.npy")?;
    let Some(&n_seqs) = meta.iter().next() else {
        bail!("meta_n_seqs.npy is empty in {}", path.display());
    };
    let n_seqs = usize::try_from(n_seqs)
        .with_context(|| format!("negative meta_n_seqs ({n_seqs}) in {}", path.display()))?;

    let mut seqs = Vec::with_capacity(n_seqs);
    for i in 0..n_seqs {
        seqs.push(read_i64(&mut npz, &format!("seq{}.npy", i))?.to_vec());
    }
    Ok(SortedSeqs { seqs })
}

pub fn save_sorted_seqs(path: &Path, seqs: &SortedSeqs) -> Result<()> {
    let mut npz = create_npz(path)?;
    npz.add_array(
        "meta_n_seqs.npy",
        &Array1::from_vec(vec![seqs.seqs.len() as i64]),
    )?;
    for (i, xs) in seqs.seqs.iter().enumerate() {
        npz.add_array(&format!("seq{}.npy", i), &Array1::from_vec(xs.clone()))?;
    }
    finish(npz)
}

pub fn save_ranges(path: &Path, ranges: &[Range<usize>]) -> Result<()> {
    let mut npz = create_npz(path)?;
    npz.add_array("starts.npy", &to_i64(ranges.iter().map(|r| r.start))?)?;
    npz.add_array("ends.npy", &to_i64(ranges.iter().map(|r| r.end))?)?;
    finish(npz)
}

pub fn load_ranges(path: &Path) -> Result<Vec<Range<usize>>> {
    let mut npz = open_npz(path)?;
    let starts = read_i64(&mut npz, "starts.npy")?;
    let ends = read_i64(&mut npz, "ends.npy")?;
    if starts.len() != ends.len() {
        bail!(
            "starts ({}) and ends ({}) differ in length in {}",
            starts.len(),
            ends.len(),
            path.display()
        );
    }
    starts
        .iter()
        .zip(ends.iter())
        .map(|(&s, &e)| {
            let s = usize::try_from(s).context("negative range start")?;
            let e = usize::try_from(e).context("negative range end")?;
            Ok(s..e)
        })
        .collect()
}

pub fn save_values(path: &Path, values: &[i64]) -> Result<()> {
    let mut npz = create_npz(path)?;
    npz.add_array("values.npy", &Array1::from_vec(values.to_vec()))?;
    finish(npz)
}

pub fn save_curve(path: &Path, curve: &[AccuracyReport]) -> Result<()> {
    let mut npz = create_npz(path)?;
    npz.add_array("k.npy", &to_i64(curve.iter().map(|r| r.k))?)?;
    npz.add_array("hits.npy", &to_i64(curve.iter().map(|r| r.hits))?)?;
    npz.add_array("total.npy", &to_i64(curve.iter().map(|r| r.total))?)?;
    let acc: Vec<f64> = curve
        .iter()
        .map(|r| r.accuracy.unwrap_or(f64::NAN))
        .collect();
    npz.add_array("accuracy.npy", &Array1::from_vec(acc))?;
    finish(npz)
}

fn finish<W: Write + Seek>(npz: NpzWriter<W>) -> Result<()> {
    npz.finish().context("finish npz")?;
    Ok(())
}
