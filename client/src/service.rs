//! The remote account service: reads the list account and issues the two program calls.

use anyhow::{
    bail,
    Context,
};
use async_trait::async_trait;
use gif_portal_interface::{
    instructions::{
        AddGif,
        Initialize,
    },
    state::BaseAccount,
    ProgramInterface,
};
use solana_address::Address;
use solana_sdk::{
    account::Account,
    hash::Hash,
    message::Instruction,
    signature::{
        Keypair,
        Signature,
    },
    signer::Signer,
    transaction::Transaction,
};

use crate::{
    config::PortalConfig,
    transactions::CustomRpcClient,
    wallet::WalletProvider,
};

#[async_trait]
pub trait PortalService: Send + Sync {
    /// Reads the list account in full. `Ok(None)` means the account doesn't exist yet.
    async fn fetch_base_account(&self) -> anyhow::Result<Option<BaseAccount>>;

    /// Creates the list account, paid for by `user` and co-signed by the base account credential.
    async fn initialize(
        &self,
        user: &Address,
        wallet: &dyn WalletProvider,
    ) -> anyhow::Result<Signature>;

    /// Appends `gif_link` to the list account, signed by the wallet alone.
    async fn add_gif(
        &self,
        user: &Address,
        wallet: &dyn WalletProvider,
        gif_link: &str,
    ) -> anyhow::Result<Signature>;
}

/// [`PortalService`] over Solana JSON-RPC.
pub struct RpcPortalService {
    rpc: CustomRpcClient,
    program: ProgramInterface,
    base_account: Keypair,
}

impl RpcPortalService {
    pub fn new(config: PortalConfig) -> Self {
        let PortalConfig {
            rpc_url,
            commitment,
            program,
            base_account,
            send_config,
        } = config;

        Self {
            rpc: CustomRpcClient::new_from_url(&rpc_url, commitment, send_config),
            program,
            base_account,
        }
    }

    pub fn base_account_address(&self) -> Address {
        self.base_account.pubkey()
    }

    fn initialize_instruction(&self, user: &Address) -> Instruction {
        Initialize {
            base_account: self.base_account_address(),
            user: *user,
        }
        .create_instruction(&self.program)
    }

    fn add_gif_instruction(&self, user: &Address, gif_link: &str) -> Instruction {
        AddGif {
            base_account: self.base_account_address(),
            user: *user,
        }
        .create_instruction(&self.program, gif_link)
    }

    /// Builds the transaction paid for by `user` and signs it: `co_signers` first, the wallet
    /// last.
    async fn build_signed(
        &self,
        user: &Address,
        wallet: &dyn WalletProvider,
        instruction: Instruction,
        co_signers: &[&Keypair],
        blockhash: Hash,
    ) -> anyhow::Result<Transaction> {
        let mut tx = self.rpc.build_transaction(user, &[instruction], blockhash);
        if !co_signers.is_empty() {
            tx.try_partial_sign(co_signers, blockhash)
                .context("Couldn't co-sign the transaction")?;
        }
        wallet.sign_transaction(tx).await
    }

    async fn sign_and_send(
        &self,
        user: &Address,
        wallet: &dyn WalletProvider,
        instruction: Instruction,
        co_signers: &[&Keypair],
    ) -> anyhow::Result<Signature> {
        let blockhash = self.rpc.latest_blockhash().await?;
        let tx = self
            .build_signed(user, wallet, instruction, co_signers, blockhash)
            .await?;
        self.rpc.send_and_confirm_txn(&tx).await
    }
}

/// Decodes the list account at `address`, which must be owned by `program_id`.
fn decode_base_account(
    address: &Address,
    account: &Account,
    program_id: &Address,
) -> anyhow::Result<BaseAccount> {
    if account.owner != *program_id {
        bail!(
            "Account {address} is owned by {}, not the portal program",
            account.owner
        );
    }

    BaseAccount::try_from_account_data(&account.data).context("Couldn't decode account")
}

#[async_trait]
impl PortalService for RpcPortalService {
    async fn fetch_base_account(&self) -> anyhow::Result<Option<BaseAccount>> {
        let address = self.base_account_address();
        let Some(account) = self.rpc.get_account_if_exists(&address).await? else {
            return Ok(None);
        };

        decode_base_account(&address, &account, &self.program.program_id).map(Some)
    }

    async fn initialize(
        &self,
        user: &Address,
        wallet: &dyn WalletProvider,
    ) -> anyhow::Result<Signature> {
        let instruction = self.initialize_instruction(user);
        self.sign_and_send(user, wallet, instruction, &[&self.base_account])
            .await
    }

    async fn add_gif(
        &self,
        user: &Address,
        wallet: &dyn WalletProvider,
        gif_link: &str,
    ) -> anyhow::Result<Signature> {
        let instruction = self.add_gif_instruction(user, gif_link);
        self.sign_and_send(user, wallet, instruction, &[]).await
    }
}
