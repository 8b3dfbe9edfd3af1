/// Runtime options read from the page query string.
///
/// `seed=<u64>` pins the pipe generator, `diag=1` opens the diagnostics panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub seed: Option<u64>,
    pub diagnostics: bool,
}

impl Config {
    pub fn from_query(search: &str) -> Config {
        let mut config = Config::default();

        for pair in search.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "seed" => {
                    if let Ok(seed) = value.parse::<u64>() {
                        config.seed = Some(seed);
                    }
                }
                "diag" => config.diagnostics = matches!(value, "1" | "true" | ""),
                _ => {}
            }
        }

        config
    }
}
