//! Runtime configuration: defaults, rc file, environment overlay.

use std::{
    collections::HashMap,
    env, fs,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use directories::BaseDirs;

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let mut map = default_map();
        let config_path = default_config_path();

        // Read .runnerrc if exists
        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((k, v)) = line.split_once('=') {
                        map.insert(k.trim().to_string(), v.trim().to_string());
                    }
                }
            }
        }

        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self {
            inner: map,
            config_path,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        // ENV first
        if let Ok(v) = env::var(key) {
            return Some(v);
        }
        self.inner.get(key).cloned()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.parse::<u64>().ok())
    }
}

fn is_config_key(k: &str) -> bool {
    // Accept known keys or RUNNER_* for forward-compat
    const KEYS: &[&str] = &[
        "RUNNER_SERVER_URL",
        "REQUEST_TIMEOUT",
        "PYTHON_BIN",
        "PYTHON_TIMEOUT",
        "SERVER_PORT",
        "JS_TIME_LIMIT_MS",
        "JS_MEMORY_LIMIT_MB",
        "DEFAULT_LANGUAGE",
    ];

    KEYS.contains(&k) || k.starts_with("RUNNER_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("codelab_runner").join(".runnerrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();

    m.insert("RUNNER_SERVER_URL".into(), "http://localhost:5000".into());
    m.insert("REQUEST_TIMEOUT".into(), "60".into());
    m.insert("PYTHON_BIN".into(), "python3".into());
    m.insert("PYTHON_TIMEOUT".into(), "10".into());
    m.insert("SERVER_PORT".into(), "5000".into());
    m.insert("JS_TIME_LIMIT_MS".into(), "5000".into());
    m.insert("JS_MEMORY_LIMIT_MB".into(), "64".into());
    m.insert("DEFAULT_LANGUAGE".into(), "javascript".into());

    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_known_key() {
        let map = default_map();
        assert_eq!(
            map.get("RUNNER_SERVER_URL").unwrap(),
            "http://localhost:5000"
        );
        assert_eq!(map.get("PYTHON_BIN").unwrap(), "python3");
        for key in [
            "REQUEST_TIMEOUT",
            "PYTHON_TIMEOUT",
            "SERVER_PORT",
            "JS_TIME_LIMIT_MS",
            "JS_MEMORY_LIMIT_MB",
        ] {
            assert!(map.get(key).unwrap().parse::<u64>().is_ok(), "{key}");
        }
    }
}
