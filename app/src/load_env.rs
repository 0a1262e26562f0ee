use std::path::PathBuf;

/// Overrides the bundled base account credential when set. Accepts the same encodings as the
/// bundled file, plus base58.
pub const BASE_ACCOUNT_ENV_VAR: &str = "GIF_PORTAL_BASE_ACCOUNT";

pub fn base_account_override() -> Option<String> {
    std::env::var(BASE_ACCOUNT_ENV_VAR).ok()
}

/// The Solana CLI's default keypair location.
pub fn default_wallet_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".config/solana/id.json")
}
