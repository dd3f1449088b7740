use std::path::Path;

use cl::{Address, MAX_INPUTS};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("at least one approved note is required")]
    NoApprovedNotes,

    #[error("a note set has {0} notes, at most {max} can be spent at once", max = MAX_INPUTS)]
    TooManyNotes(usize),

    #[error("notes must carry a non-zero value")]
    ZeroValueNote,

    #[error("note set values overflow a u64 total")]
    ValueOverflow,

    #[error("invoice of {invoice} exceeds the {available} held in the note set")]
    InvoiceExceedsBalance { invoice: u64, available: u64 },
}

/// Deployment wiring of an authority: the address it holds notes under and
/// the only account allowed to hand out approvals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityConfig {
    pub address: Address,
    pub owner: Address,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            address: Address::from_label("batch-approval"),
            owner: Address::from_label("alice"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_asset")]
    pub asset: String,
    #[serde(default = "default_minter")]
    pub minter: Address,
    #[serde(default = "default_recipient")]
    pub recipient: Address,
    #[serde(default = "default_approved_notes")]
    pub approved_notes: Vec<u64>,
    #[serde(default = "default_unapproved_notes")]
    pub unapproved_notes: Vec<u64>,
    #[serde(default = "default_invoice")]
    pub invoice: u64,
    #[serde(default)]
    pub authority: AuthorityConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            asset: default_asset(),
            minter: default_minter(),
            recipient: default_recipient(),
            approved_notes: default_approved_notes(),
            unapproved_notes: default_unapproved_notes(),
            invoice: default_invoice(),
            authority: AuthorityConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.approved_notes.is_empty() {
            return Err(ConfigError::NoApprovedNotes);
        }
        for notes in [&self.approved_notes, &self.unapproved_notes] {
            if notes.len() > MAX_INPUTS {
                return Err(ConfigError::TooManyNotes(notes.len()));
            }
            if notes.contains(&0) {
                return Err(ConfigError::ZeroValueNote);
            }
            let available = total_value(notes.iter().copied())?;
            if !notes.is_empty() && self.invoice > available {
                return Err(ConfigError::InvoiceExceedsBalance {
                    invoice: self.invoice,
                    available,
                });
            }
        }
        if self.invoice == 0 {
            return Err(ConfigError::ZeroValueNote);
        }
        Ok(())
    }
}

/// Sum of note values, failing instead of wrapping past `u64::MAX`.
pub(crate) fn total_value(values: impl IntoIterator<Item = u64>) -> Result<u64, ConfigError> {
    values
        .into_iter()
        .try_fold(0u64, |total, v| total.checked_add(v))
        .ok_or(ConfigError::ValueOverflow)
}

fn default_asset() -> String {
    "ZKASSET".to_string()
}

fn default_minter() -> Address {
    Address::from_label("zk-asset-mintable")
}

fn default_recipient() -> Address {
    Address::from_label("bob")
}

fn default_approved_notes() -> Vec<u64> {
    vec![50, 75, 100]
}

fn default_unapproved_notes() -> Vec<u64> {
    vec![25, 125]
}

const fn default_invoice() -> u64 {
    100
}
