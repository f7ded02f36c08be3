use rayon::ThreadPoolBuilder;
use std::sync::Once;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadConfig {
    pub count: usize,
    pub source: String,
}

const THREAD_HINTS: [&str; 6] = [
    "BLML_THREADS",
    "RAYON_NUM_THREADS",
    "SLURM_CPUS_PER_TASK",
    "SLURM_CPUS_ON_NODE",
    "PBS_NP",
    "OMP_NUM_THREADS",
];

fn parse_threads<F>(keys: &[&str], lookup: F) -> Option<ThreadConfig>
where
    F: Fn(&str) -> Option<String>,
{
    for &key in keys {
        if let Some(v) = lookup(key) {
            if let Ok(val) = v.trim().parse::<usize>() {
                if val > 0 {
                    return Some(ThreadConfig {
                        count: val,
                        source: key.to_string(),
                    });
                }
            }
        }
    }
    None
}

pub fn detect_thread_config() -> ThreadConfig {
    if let Some(cfg) = parse_threads(&THREAD_HINTS, env_lookup) {
        return cfg;
    }

    let fallback = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .max(1);

    ThreadConfig {
        count: fallback,
        source: "available_parallelism".to_string(),
    }
}

/// Size the global rayon pool from the environment, once per process.
pub fn configure_thread_pool() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let cfg = detect_thread_config();
        match ThreadPoolBuilder::new()
            .num_threads(cfg.count)
            .thread_name(|i| format!("blml-worker-{i}"))
            .build_global()
        {
            Ok(_) => {
                info!("[threads] rayon pool = {} threads (hint: {})", cfg.count, cfg.source);
            }
            Err(err) => {
                warn!("[threads] failed to configure rayon pool ({err}); continuing with default");
            }
        }
    });
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_top_k<F>(lookup: F) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    lookup("BLML_TOP_K")
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&k| k > 0)
        .unwrap_or(1)
}

fn parse_progress<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup("BLML_NO_PROGRESS").as_deref() != Some("1")
}

/// Default K for `acc` when none is given on the command line.
pub fn default_top_k() -> usize {
    parse_top_k(env_lookup)
}

pub fn progress_enabled() -> bool {
    parse_progress(env_lookup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    type Env = HashMap<&'static str, &'static str>;

    fn lookup(env: &Env) -> impl Fn(&str) -> Option<String> + '_ {
        move |k: &str| env.get(k).map(|v| v.to_string())
    }

    #[test]
    fn first_valid_hint_wins() {
        let env = HashMap::from([
            ("BLML_THREADS", "0"),
            ("PBS_NP", "6"),
            ("OMP_NUM_THREADS", "2"),
        ]);
        let cfg = parse_threads(&THREAD_HINTS, lookup(&env)).unwrap();
        assert_eq!(
            cfg,
            ThreadConfig {
                count: 6,
                source: "PBS_NP".to_string()
            }
        );
    }

    #[test]
    fn garbage_hints_are_skipped() {
        let env = HashMap::from([("RAYON_NUM_THREADS", "lots")]);
        assert_eq!(parse_threads(&THREAD_HINTS, lookup(&env)), None);
    }

    #[test]
    fn detected_count_is_positive() {
        assert!(detect_thread_config().count >= 1);
    }

    #[test]
    fn top_k_defaults_to_one() {
        assert_eq!(parse_top_k(lookup(&Env::new())), 1);
        for bad in ["0", "-3", "three", ""] {
            let env = HashMap::from([("BLML_TOP_K", bad)]);
            assert_eq!(parse_top_k(lookup(&env)), 1, "BLML_TOP_K={bad:?}");
        }
    }

    #[test]
    fn top_k_from_env() {
        let env = HashMap::from([("BLML_TOP_K", " 5 ")]);
        assert_eq!(parse_top_k(lookup(&env)), 5);
    }

    #[test]
    fn progress_is_on_unless_disabled() {
        assert!(parse_progress(lookup(&Env::new())));
        assert!(parse_progress(lookup(&HashMap::from([("BLML_NO_PROGRESS", "0")]))));
        assert!(!parse_progress(lookup(&HashMap::from([("BLML_NO_PROGRESS", "1")]))));
    }
}
