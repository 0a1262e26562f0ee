//! Session configuration, constructed once at start-up and handed to the session.
//!
//! The base account credential is a single keypair shared by every deployment of the front end:
//! its public key is the id of the one list account the portal reads and appends to. Whoever holds
//! the bundled file can create that account, so treat the file as public.

use std::path::Path;

use anyhow::{
    anyhow,
    bail,
    Context,
};
use gif_portal_interface::ProgramInterface;
use itertools::Itertools;
use serde_json::Value;
use solana_address::Address;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{
    bs58,
    signature::Keypair,
    signer::Signer,
};

use crate::transactions::SendTransactionConfig;

/// Everything the session needs to reach the program.
pub struct PortalConfig {
    pub rpc_url: String,
    pub commitment: CommitmentConfig,
    pub program: ProgramInterface,
    pub base_account: Keypair,
    pub send_config: SendTransactionConfig,
}

impl PortalConfig {
    /// The id of the list account, which is always the credential's public key.
    pub fn base_account_address(&self) -> Address {
        self.base_account.pubkey()
    }
}

/// Where the base account credential came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum CredentialSource {
    Environment,
    BundledFile,
}

/// Loads the base account credential, preferring a non-empty environment value over the bundled
/// file.
pub fn load_base_account(
    env_value: Option<&str>,
    bundled_path: &Path,
) -> anyhow::Result<(Keypair, CredentialSource)> {
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        let keypair = parse_keypair(value).context("Invalid base account in environment")?;
        return Ok((keypair, CredentialSource::Environment));
    }

    let keypair = read_keypair_file(bundled_path)?;
    Ok((keypair, CredentialSource::BundledFile))
}

pub fn read_keypair_file(path: &Path) -> anyhow::Result<Keypair> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Couldn't read keypair file {}", path.display()))?;
    parse_keypair(&contents).with_context(|| format!("Invalid keypair file {}", path.display()))
}

/// Parses a keypair from any of the encodings in circulation:
/// - a JSON byte array (the Solana CLI format),
/// - a base58 string,
/// - `{"secretKey": ...}` or `{"_keypair": {"secretKey": ...}}`, where the secret key is a byte
///   array or an object keyed by byte index.
pub fn parse_keypair(s: &str) -> anyhow::Result<Keypair> {
    let s = s.trim();
    let bytes = if s.starts_with('[') || s.starts_with('{') {
        let json: Value = serde_json::from_str(s).context("Invalid JSON keypair")?;
        secret_key_bytes(&json)?
    } else {
        bs58::decode(s)
            .into_vec()
            .context("Invalid base58 keypair")?
    };

    Keypair::try_from(bytes.as_slice()).map_err(|e| anyhow!("Invalid keypair bytes: {e:?}"))
}

fn secret_key_bytes(json: &Value) -> anyhow::Result<Vec<u8>> {
    match json {
        Value::Array(values) => values.iter().map(json_byte).collect(),
        Value::Object(map) => {
            if let Some(inner) = map.get("_keypair") {
                return secret_key_bytes(inner);
            }
            if let Some(inner) = map.get("secretKey") {
                return secret_key_bytes(inner);
            }

            // An index-keyed object. Order numerically; a lexical order would put "10" before "2".
            let indexed: Vec<(usize, &Value)> = map
                .iter()
                .map(|(k, v)| {
                    k.parse::<usize>()
                        .map(|i| (i, v))
                        .map_err(|_| anyhow!("Unexpected key `{k}` in keypair object"))
                })
                .collect::<anyhow::Result<_>>()?;

            indexed
                .into_iter()
                .sorted_by_key(|(i, _)| *i)
                .enumerate()
                .map(|(expected, (i, v))| {
                    if expected != i {
                        bail!("Keypair object is missing byte index {expected}");
                    }
                    json_byte(v)
                })
                .collect()
        }
        other => bail!("Unsupported keypair JSON: {other}"),
    }
}

fn json_byte(value: &Value) -> anyhow::Result<u8> {
    value
        .as_u64()
        .and_then(|n| u8::try_from(n).ok())
        .ok_or(anyhow!("Keypair byte out of range: {value}"))
}
