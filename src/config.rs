use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "registrar.sqlite3";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub seed_path: Option<PathBuf>,
    pub log_filter: String,
    /// `.env` file merged into the environment, if any.
    pub env_file: Option<PathBuf>,
}

impl Config {
    /// Read settings from the process environment, after merging a `.env`
    /// file from the working directory if one exists.
    pub fn from_env() -> Self {
        let env_file = dotenvy::dotenv().ok();
        Self {
            env_file,
            ..Self::from_lookup(|key| dotenvy::var(key).ok())
        }
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            db_path: non_empty("REGISTRAR_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            seed_path: non_empty("REGISTRAR_SEED").map(PathBuf::from),
            log_filter: non_empty("REGISTRAR_LOG")
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            env_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = Config::from_lookup(lookup(&[]));
        assert_eq!(cfg.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(cfg.seed_path, None);
        assert_eq!(cfg.log_filter, "warn");
    }

    #[test]
    fn values_override_defaults() {
        let cfg = Config::from_lookup(lookup(&[
            ("REGISTRAR_DB", "/tmp/reg.sqlite3"),
            ("REGISTRAR_SEED", "seed.json"),
            ("REGISTRAR_LOG", "registrar=debug"),
        ]));
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/reg.sqlite3"));
        assert_eq!(cfg.seed_path, Some(PathBuf::from("seed.json")));
        assert_eq!(cfg.log_filter, "registrar=debug");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = Config::from_lookup(lookup(&[("REGISTRAR_DB", "  "), ("REGISTRAR_SEED", "")]));
        assert_eq!(cfg.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(cfg.seed_path, None);
    }
}
