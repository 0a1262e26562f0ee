//! Lightweight, nonblocking RPC client utilities for reading the portal account and submitting
//! already-signed transactions.

use anyhow::Context;
use solana_address::Address;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_compute_budget_interface::ComputeBudgetInstruction;
use solana_sdk::{
    account::Account,
    hash::Hash,
    message::{
        Instruction,
        Message,
    },
    signature::Signature,
    transaction::Transaction,
};

use crate::{
    print_kv,
    LogColor,
};

pub const DEVNET_URL: &str = "https://api.devnet.solana.com";

pub struct CustomRpcClient {
    pub client: RpcClient,
    pub config: SendTransactionConfig,
}

impl Default for CustomRpcClient {
    fn default() -> Self {
        CustomRpcClient::new_from_url(DEVNET_URL, CommitmentConfig::processed(), Default::default())
    }
}

impl CustomRpcClient {
    pub fn new_from_url(
        url: &str,
        commitment: CommitmentConfig,
        config: SendTransactionConfig,
    ) -> Self {
        CustomRpcClient {
            client: RpcClient::new_with_commitment(url.into(), commitment),
            config,
        }
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.client.commitment()
    }

    pub async fn latest_blockhash(&self) -> anyhow::Result<Hash> {
        self.client
            .get_latest_blockhash()
            .await
            .context("Couldn't fetch the latest blockhash")
    }

    /// Builds an unsigned transaction paid for by `payer`, prefixed with compute budget
    /// instructions when [`SendTransactionConfig::compute_budget`] is set.
    pub fn build_transaction(
        &self,
        payer: &Address,
        instructions: &[Instruction],
        blockhash: Hash,
    ) -> Transaction {
        let final_instructions: &[Instruction] = &[
            self.config.compute_budget.map_or(vec![], |budget| {
                vec![
                    ComputeBudgetInstruction::set_compute_unit_limit(budget),
                    ComputeBudgetInstruction::set_compute_unit_price(1),
                ]
            }),
            instructions.to_vec(),
        ]
        .concat();

        let msg = Message::new_with_blockhash(final_instructions, Some(payer), &blockhash);
        Transaction::new_unsigned(msg)
    }

    /// Sends a fully signed transaction and waits for confirmation at the client's commitment.
    pub async fn send_and_confirm_txn(&self, tx: &Transaction) -> anyhow::Result<Signature> {
        match self.client.send_and_confirm_transaction(tx).await {
            Ok(signature) => {
                if matches!(self.config.debug_logs, Some(true)) {
                    print_kv!("Signature", signature, LogColor::Info);
                }
                Ok(signature)
            }
            Err(error) => {
                if let Some(payer) = tx.message.account_keys.first() {
                    print_kv!("Payer", payer, LogColor::Error);
                }
                Err(error).context("Failed transaction submission")
            }
        }
    }

    /// Fetches an account at the client's commitment. A missing account is `Ok(None)`, not an
    /// error.
    pub async fn get_account_if_exists(&self, address: &Address) -> anyhow::Result<Option<Account>> {
        Ok(self
            .client
            .get_account_with_commitment(address, self.commitment())
            .await
            .context("Couldn't retrieve account data")?
            .value)
    }
}

#[derive(Clone)]
pub struct SendTransactionConfig {
    pub compute_budget: Option<u32>,
    pub debug_logs: Option<bool>,
}

impl Default for SendTransactionConfig {
    fn default() -> Self {
        SendTransactionConfig {
            compute_budget: Default::default(),
            debug_logs: Some(true),
        }
    }
}
