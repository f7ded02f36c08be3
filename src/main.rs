use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;

use blml::{eval, logging, runtime};

enum RunMode {
    Acc {
        k: usize,
        inputs: Vec<PathBuf>,
    },
    Curve {
        input: PathBuf,
        k_max: usize,
        out: Option<PathBuf>,
    },
    Groups {
        input: PathBuf,
        out: Option<PathBuf>,
    },
    Split {
        n: usize,
        ratios: Vec<u64>,
        out: Option<PathBuf>,
    },
    Intersect {
        input: PathBuf,
        out: Option<PathBuf>,
    },
}

fn usage() -> ! {
    eprintln!(
        "usage: blml acc [-k K] <inputs.npz>...\n       \
         blml curve <inputs.npz> <k_max> [out.npz]\n       \
         blml groups <inputs.npz> [out.npz]\n       \
         blml split <n> <r1> [r2 ...] [--out out.npz]\n       \
         blml intersect <seqs.npz> [out.npz]"
    );
    std::process::exit(1);
}

fn existing(path: String) -> Result<PathBuf> {
    let path = PathBuf::from(path);
    if !path.exists() {
        bail!("input {:?} does not exist", path);
    }
    Ok(path)
}

fn parse_count(what: &str, raw: &str) -> Result<usize> {
    raw.parse::<usize>()
        .with_context(|| format!("{what} must be a non-negative integer, got {raw:?}"))
}

fn parse_args() -> Result<RunMode> {
    let mut args = env::args().skip(1);
    let cmd = args.next().unwrap_or_else(|| usage());
    let rest: Vec<String> = args.collect();

    match cmd.as_str() {
        "acc" => {
            let mut k = runtime::default_top_k();
            let mut inputs = Vec::new();
            let mut it = rest.into_iter();
            while let Some(arg) = it.next() {
                if arg == "-k" || arg == "--k" {
                    let raw = it.next().unwrap_or_else(|| usage());
                    k = parse_count("k", &raw)?;
                } else {
                    inputs.push(existing(arg)?);
                }
            }
            if inputs.is_empty() {
                usage();
            }
            Ok(RunMode::Acc { k, inputs })
        }
        "curve" => {
            let mut it = rest.into_iter();
            let input = existing(it.next().unwrap_or_else(|| usage()))?;
            let k_max = parse_count("k_max", &it.next().unwrap_or_else(|| usage()))?;
            let out = it.next().map(PathBuf::from);
            Ok(RunMode::Curve { input, k_max, out })
        }
        "groups" | "intersect" => {
            let mut it = rest.into_iter();
            let input = existing(it.next().unwrap_or_else(|| usage()))?;
            let out = it.next().map(PathBuf::from);
            if cmd == "groups" {
                Ok(RunMode::Groups { input, out })
            } else {
                Ok(RunMode::Intersect { input, out })
            }
        }
        "split" => {
            let mut it = rest.into_iter();
            let n = parse_count("n", &it.next().unwrap_or_else(|| usage()))?;
            let mut ratios = Vec::new();
            let mut out = None;
            while let Some(arg) = it.next() {
                if arg == "--out" {
                    out = Some(PathBuf::from(it.next().unwrap_or_else(|| usage())));
                } else {
                    let r = arg
                        .parse::<u64>()
                        .with_context(|| format!("ratio must be a positive integer, got {arg:?}"))?;
                    ratios.push(r);
                }
            }
            Ok(RunMode::Split { n, ratios, out })
        }
        _ => usage(),
    }
}

fn main() -> Result<()> {
    logging::init_tracing();
    runtime::configure_thread_pool();

    match parse_args()? {
        RunMode::Acc { k, inputs } => {
            let results = eval::run_acc(&inputs, k, runtime::progress_enabled())?;
            for r in &results {
                println!(
                    "[acc {}] rows={} | {} | {:.3}s",
                    r.path.display(),
                    r.rows,
                    eval::format_report(&r.report),
                    r.t_total
                );
            }
        }
        RunMode::Curve { input, k_max, out } => {
            for report in eval::run_curve(&input, k_max, out.as_deref())? {
                println!("{}", eval::format_report(&report));
            }
        }
        RunMode::Groups { input, out } => {
            let groups = eval::run_groups(&input, out.as_deref())?;
            println!("{}", eval::format_ranges(&groups));
        }
        RunMode::Split { n, ratios, out } => {
            let ranges = eval::run_split(n, &ratios, out.as_deref())?;
            println!("{}", eval::format_ranges(&ranges));
        }
        RunMode::Intersect { input, out } => {
            let values = eval::run_intersect(&input, out.as_deref())?;
            let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            println!("[{}]", parts.join(", "));
        }
    }
    Ok(())
}
