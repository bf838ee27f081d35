use serde::{Deserialize, Serialize};

use super::defaults;

/// Session engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Neighbors requested per positive seed when expanding the working
    /// set. With `N` distinct positive seeds the working set ends up
    /// between `seed_fanout` and `N * seed_fanout` members, depending on
    /// neighbor overlap.
    pub seed_fanout: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed_fanout: defaults::DEFAULT_SEED_FANOUT,
        }
    }
}

impl SessionConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
