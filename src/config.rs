use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use yellowstone_grpc_proto::prelude::CommitmentLevel;

use crate::core::error::ConfigError;
use crate::types::{AccountField, RESERVED_FIELD_NAMES};

pub const DEFAULT_FILTER_NAME: &str = "pumpfun";

/// Finality level requested from the provider.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl From<Commitment> for CommitmentLevel {
    fn from(value: Commitment) -> Self {
        match value {
            Commitment::Processed => CommitmentLevel::Processed,
            Commitment::Confirmed => CommitmentLevel::Confirmed,
            Commitment::Finalized => CommitmentLevel::Finalized,
        }
    }
}

/// Connection parameters for one subscription.
///
/// `endpoint` and `x_token` are passed to the client untouched.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StreamConfig {
    pub endpoint: String,
    #[serde(default)]
    pub x_token: Option<String>,
    #[serde(default = "StreamConfig::default_filter_name")]
    pub filter_name: String,
    #[serde(default)]
    pub commitment: Commitment,
}

impl StreamConfig {
    pub fn new(endpoint: impl Into<String>, x_token: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            x_token: x_token.filter(|token| !token.is_empty()),
            filter_name: Self::default_filter_name(),
            commitment: Commitment::default(),
        }
    }

    /// Reads `ENDPOINT` (required) and `TOKEN` (optional) from the process
    /// environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint = std::env::var("ENDPOINT")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing("ENDPOINT"))?;
        Ok(Self::new(endpoint, std::env::var("TOKEN").ok()))
    }

    pub fn with_filter_name(mut self, filter_name: impl Into<String>) -> Self {
        self.filter_name = filter_name.into();
        self
    }

    pub fn with_commitment(mut self, commitment: Commitment) -> Self {
        self.commitment = commitment;
        self
    }

    fn default_filter_name() -> String {
        DEFAULT_FILTER_NAME.to_string()
    }
}

/// What the pipeline looks for and what it extracts.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    pub program_ids: Vec<String>,
    pub discriminators: Vec<[u8; 8]>,
    #[serde(default)]
    pub fields: Vec<AccountField>,
}

impl FilterConfig {
    pub fn new(
        program_ids: Vec<String>,
        discriminators: Vec<[u8; 8]>,
        fields: Vec<AccountField>,
    ) -> Self {
        Self {
            program_ids,
            discriminators,
            fields,
        }
    }

    pub fn from_json_slice(data: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.program_ids.is_empty() {
            return Err(ConfigError::EmptyFilter("program ids"));
        }
        if self.discriminators.is_empty() {
            return Err(ConfigError::EmptyFilter("discriminators"));
        }
        for id in &self.program_ids {
            Pubkey::from_str(id).map_err(|err| ConfigError::invalid_program_id(id, err))?;
        }
        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if RESERVED_FIELD_NAMES.contains(&field.name.as_str()) {
                return Err(ConfigError::ReservedField(field.name.clone()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(ConfigError::DuplicateField(field.name.clone()));
            }
        }
        Ok(())
    }
}
