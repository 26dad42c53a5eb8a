use config::{ConfigError, Map, Source, Value, ValueKind};
use std::{collections::HashMap, env};

const PREFIX: &str = "stm--";
const SEPARATOR: &str = "--";

/// Configuration source reading the `STM--` prefixed environment variables.
///
/// Nesting levels are separated by `--` and each level is converted from SNAKE_CASE to camelCase,
/// ex.: `STM--POOL--MAX_USES` sets `pool.maxUses`.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: Option<HashMap<String, String>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given variables instead of the process environment.
    #[cfg(test)]
    pub fn with_vars(vars: HashMap<String, String>) -> Self {
        Self { vars: Some(vars) }
    }

    fn convert_key_case(key: &str) -> String {
        key.split('_')
            .enumerate()
            .map(|(i, s)| {
                if i == 0 {
                    s.to_lowercase()
                } else {
                    let mut chars = s.chars();
                    chars
                        .next()
                        .map(|c| c.to_uppercase().collect::<String>())
                        .unwrap_or_default()
                        + &chars.as_str().to_lowercase()
                }
            })
            .collect()
    }

    fn config_key(env_key: &str) -> Option<String> {
        let key = env_key.to_lowercase();
        let key = key.strip_prefix(PREFIX)?;
        Some(
            key.split(SEPARATOR)
                .map(Self::convert_key_case)
                .collect::<Vec<_>>()
                .join("."),
        )
    }
}

impl Source for Environment {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new((*self).clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let uri: String = "environment".into();

        let vars: Box<dyn Iterator<Item = (String, String)>> = match &self.vars {
            Some(vars) => Box::new(vars.clone().into_iter()),
            None => Box::new(env::vars()),
        };

        let mut m = Map::new();
        for (env_key, value) in vars {
            let Some(key) = Self::config_key(&env_key) else {
                continue;
            };
            log::debug!("Reading env {} as {}...", env_key, key);
            m.insert(key, Value::new(Some(&uri), ValueKind::String(value)));
        }

        log::trace!("Environment: {:#?}", m);
        Ok(m)
    }
}
