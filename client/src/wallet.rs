//! The wallet provider seam.
//!
//! A provider authenticates the user and signs transactions on their behalf. [`KeypairWallet`] is
//! the local implementation: a Solana CLI keypair file standing in for a browser extension.

use std::{
    path::Path,
    sync::atomic::{
        AtomicBool,
        Ordering,
    },
};

use anyhow::{
    anyhow,
    bail,
    Context,
};
use async_trait::async_trait;
use solana_address::Address;
use solana_sdk::{
    signature::Keypair,
    signer::Signer,
    transaction::Transaction,
};

use crate::config::read_keypair_file;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Only succeed if the user already approved this front end; never prompt.
    pub only_if_trusted: bool,
}

#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Whether a provider is present at all.
    fn is_available(&self) -> bool;

    /// Whether the provider is one this front end knows how to drive.
    fn is_trusted_extension(&self) -> bool;

    /// Connects and returns the user's public key. May prompt out of band unless
    /// [`ConnectOptions::only_if_trusted`] is set.
    async fn connect(&self, options: ConnectOptions) -> anyhow::Result<Address>;

    /// Adds the user's signature to a transaction whose other signatures may already be present.
    async fn sign_transaction(&self, transaction: Transaction) -> anyhow::Result<Transaction>;
}

/// A wallet backed by a local keypair.
///
/// Approval is per session: the first explicit connect approves the front end, after which
/// silent connects succeed. Constructing it with `trusted` set approves up front, which is how
/// the host models a previously approved connection.
pub struct KeypairWallet {
    keypair: Option<Keypair>,
    trusted: AtomicBool,
    connected: AtomicBool,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair, trusted: bool) -> Self {
        Self {
            keypair: Some(keypair),
            trusted: AtomicBool::new(trusted),
            connected: AtomicBool::new(false),
        }
    }

    /// A wallet that isn't installed.
    pub fn absent() -> Self {
        Self {
            keypair: None,
            trusted: AtomicBool::new(false),
            connected: AtomicBool::new(false),
        }
    }

    /// Loads the wallet keypair, or returns an absent wallet if there's no file at `path`.
    pub fn from_file_or_absent(path: &Path, trusted: bool) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::absent());
        }
        let keypair = read_keypair_file(path).context("Couldn't load wallet")?;
        Ok(Self::new(keypair, trusted))
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    fn keypair(&self) -> anyhow::Result<&Keypair> {
        self.keypair.as_ref().ok_or(anyhow!("No wallet provider found"))
    }
}

#[async_trait]
impl WalletProvider for KeypairWallet {
    fn is_available(&self) -> bool {
        self.keypair.is_some()
    }

    fn is_trusted_extension(&self) -> bool {
        self.is_available()
    }

    async fn connect(&self, options: ConnectOptions) -> anyhow::Result<Address> {
        let keypair = self.keypair()?;
        if options.only_if_trusted && !self.trusted.load(Ordering::Relaxed) {
            bail!("User hasn't approved this app yet");
        }

        self.trusted.store(true, Ordering::Relaxed);
        self.connected.store(true, Ordering::Relaxed);
        Ok(keypair.pubkey())
    }

    async fn sign_transaction(&self, mut transaction: Transaction) -> anyhow::Result<Transaction> {
        if !self.is_connected() {
            bail!("Wallet isn't connected");
        }
        let keypair = self.keypair()?;
        let blockhash = transaction.message.recent_blockhash;
        transaction
            .try_partial_sign(&[keypair], blockhash)
            .context("Wallet couldn't sign the transaction")?;
        Ok(transaction)
    }
}
