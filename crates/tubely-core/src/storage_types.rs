use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage backend types
///
/// Selected per asset class in configuration. Defined in core because both the
/// configuration layer and the storage factory need it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Local,
    Memory,
    S3,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(StorageBackend::Local),
            "memory" => Ok(StorageBackend::Memory),
            "s3" => Ok(StorageBackend::S3),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::S3 => write!(f, "s3"),
        }
    }
}

/// How asset keys are derived from an owner identifier.
///
/// `Deterministic` keys overwrite the previous asset of the same owner and
/// extension. `Random` keys keep every upload; the owner's URL field is the only
/// pointer to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStrategy {
    #[default]
    Deterministic,
    Random,
}

impl FromStr for KeyStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deterministic" => Ok(KeyStrategy::Deterministic),
            "random" => Ok(KeyStrategy::Random),
            _ => Err(anyhow::anyhow!("Invalid key strategy: {}", s)),
        }
    }
}

impl Display for KeyStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            KeyStrategy::Deterministic => write!(f, "deterministic"),
            KeyStrategy::Random => write!(f, "random"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parse_is_case_insensitive() {
        assert_eq!("LOCAL".parse::<StorageBackend>().unwrap(), StorageBackend::Local);
        assert_eq!(" memory ".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert_eq!("s3".parse::<StorageBackend>().unwrap(), StorageBackend::S3);
        assert!("nfs".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_key_strategy_display_round_trips() {
        for strategy in [KeyStrategy::Deterministic, KeyStrategy::Random] {
            assert_eq!(strategy.to_string().parse::<KeyStrategy>().unwrap(), strategy);
        }
        assert_eq!(KeyStrategy::default(), KeyStrategy::Deterministic);
    }
}
