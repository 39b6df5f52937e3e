use crate::error::ConfigError;
use std::{collections::HashMap, fs, io, path::Path};
use tracing::debug;

/// Environment variable snapshot, optionally topped up from a `.env` file.
///
/// Variables already present in the process environment always win over the
/// file, so a file can provide defaults without masking real settings.
#[derive(Debug, Clone, Default)]
pub struct EnvManager {
    vars: HashMap<String, String>,
}

impl EnvManager {
    pub fn new() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Load variables from a .env file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::EnvFileRead {
            path: path.to_path_buf(),
            source,
        })?;

        self.parse_env_content(&content)?;
        debug!("Loaded env file {}", path.display());
        Ok(())
    }

    /// Like [`EnvManager::load_from_file`], but a missing file is not an error.
    /// Returns whether the file was read.
    pub fn load_optional_file<P: AsRef<Path>>(&mut self, path: P) -> Result<bool, ConfigError> {
        match self.load_from_file(path) {
            Ok(()) => Ok(true),
            Err(ConfigError::EnvFileRead { source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn require(&self, key: &str) -> Result<&str, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingVar(key.to_string()))
    }

    /// First of `keys` that is set; the error names the preferred key.
    pub fn require_any<'a>(&'a self, keys: &[&'a str]) -> Result<(&'a str, &'a str), ConfigError> {
        keys.iter()
            .find_map(|key| self.get(key).map(|value| (*key, value)))
            .ok_or_else(|| ConfigError::MissingVar(keys.first().copied().unwrap_or("").into()))
    }

    fn parse_env_content(&mut self, content: &str) -> Result<(), ConfigError> {
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);

            // Parse KEY=VALUE format
            if let Some(eq_pos) = line.find('=') {
                let key = line[..eq_pos].trim();
                let value = line[eq_pos + 1..].trim();

                if key.is_empty() {
                    return Err(ConfigError::EnvFileSyntax(format!(
                        "empty key at line {}",
                        line_num + 1
                    )));
                }

                self.vars
                    .entry(key.to_string())
                    .or_insert_with(|| Self::unquote_value(value));
            } else {
                return Err(ConfigError::EnvFileSyntax(format!(
                    "malformed line {} (expected KEY=VALUE)",
                    line_num + 1
                )));
            }
        }

        Ok(())
    }

    fn unquote_value(value: &str) -> String {
        let value = value.trim();

        // Handle double quotes
        if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
            return value[1..value.len() - 1].to_string();
        }

        // Handle single quotes
        if value.starts_with('\'') && value.ends_with('\'') && value.len() >= 2 {
            return value[1..value.len() - 1].to_string();
        }

        value.to_string()
    }
}
