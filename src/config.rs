use serde::Deserialize;

/// What happens when a caller asks for a copy of the shared instance.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicationPolicy {
    /// Hand back the shared instance itself.
    Canonical,
    /// Fail with `Error::DuplicationNotSupported`.
    Reject,
}

impl Default for DuplicationPolicy {
    fn default() -> Self {
        DuplicationPolicy::Canonical
    }
}

/// Per registry settings.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub duplication: DuplicationPolicy,
}

impl Config {
    pub fn new(duplication: DuplicationPolicy) -> Config {
        Config { duplication }
    }
}
