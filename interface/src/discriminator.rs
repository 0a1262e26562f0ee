//! Anchor-compatible 8-byte discriminators.
//!
//! Anchor prefixes instruction data with `sha256("global:<snake_case_name>")[..8]` and account
//! data with `sha256("account:<AccountName>")[..8]`.

use sha2::{
    Digest,
    Sha256,
};

pub const DISCRIMINATOR_LEN: usize = 8;

pub type Discriminator = [u8; DISCRIMINATOR_LEN];

const INSTRUCTION_NAMESPACE: &str = "global";
const ACCOUNT_NAMESPACE: &str = "account";

fn hash_prefix(namespace: &str, name: &str) -> Discriminator {
    let digest = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    discriminator
}

/// The discriminator for an instruction, given its IDL name in either camelCase or snake_case.
pub fn instruction_discriminator(name: &str) -> Discriminator {
    hash_prefix(INSTRUCTION_NAMESPACE, &to_snake_case(name))
}

/// The discriminator for an account type, given its Rust type name (e.g. `BaseAccount`).
pub fn account_discriminator(name: &str) -> Discriminator {
    hash_prefix(ACCOUNT_NAMESPACE, name)
}

/// Converts an IDL identifier such as `startStuffOff` to `start_stuff_off`. Identifiers that are
/// already snake_case pass through unchanged.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower_or_digit = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower_or_digit {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower_or_digit = false;
        } else {
            prev_lower_or_digit = c.is_ascii_lowercase() || c.is_ascii_digit();
            out.push(c);
        }
    }
    out
}
