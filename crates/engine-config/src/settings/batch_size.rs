use crate::{error::ConfigError, settings::parse_u64};
use std::fmt;

/// Rows per page. Always at least one, otherwise the cursor would never move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSize(u64);

impl BatchSize {
    pub fn new(size: u64) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidValue {
                key: super::BATCH_SIZE.to_string(),
                value: size.to_string(),
                reason: "batch size must be greater than zero".to_string(),
            });
        }
        Ok(BatchSize(size))
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        Self::new(parse_u64(super::BATCH_SIZE, raw)?)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_rejected() {
        assert!(matches!(
            BatchSize::parse("0"),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "BATCH_SIZE"
        ));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(BatchSize::parse(" 250 ").unwrap().get(), 250);
    }

    #[test]
    fn test_negative_is_rejected() {
        assert!(BatchSize::parse("-5").is_err());
    }
}
