use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use client::{
    config::{
        load_base_account,
        CredentialSource,
        PortalConfig,
    },
    print_kv,
    transactions::{
        SendTransactionConfig,
        DEVNET_URL,
    },
    wallet::KeypairWallet,
    LogColor,
};
use gif_portal_interface::{
    idl::{
        Idl,
        DEFAULT_ADD_GIF_METHOD,
        DEFAULT_INITIALIZE_METHOD,
    },
    ProgramInterface,
};
use solana_commitment_config::CommitmentConfig;

use crate::load_env;

const BUNDLED_IDL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/idl.json");
const BUNDLED_KEYPAIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/keypair.json");

#[derive(Parser, Debug)]
#[command(name = "gif-portal")]
pub struct CliArgs {
    /// The RPC endpoint.
    #[arg(short = 'u', long, default_value = DEVNET_URL)]
    pub url: String,

    /// The program's IDL document.
    #[arg(long, default_value = BUNDLED_IDL)]
    pub idl: PathBuf,

    /// The base account credential file. Ignored when the environment variable
    /// `GIF_PORTAL_BASE_ACCOUNT` is set.
    #[arg(long, default_value = BUNDLED_KEYPAIR)]
    pub keypair: PathBuf,

    /// The wallet keypair file. Defaults to the Solana CLI keypair.
    #[arg(short = 'w', long)]
    pub wallet: Option<PathBuf>,

    /// Treat the wallet as having already approved this app, so the start-up reconnect succeeds.
    #[arg(long)]
    pub trusted: bool,

    /// The IDL name of the account-creation instruction.
    #[arg(long, default_value = DEFAULT_INITIALIZE_METHOD)]
    pub init_method: String,

    /// The IDL name of the append instruction.
    #[arg(long, default_value = DEFAULT_ADD_GIF_METHOD)]
    pub append_method: String,

    /// Prepend a compute unit limit to every transaction.
    #[arg(long)]
    pub compute_budget: Option<u32>,
}

/// Builds the session configuration from the CLI args and the base account override in the
/// environment. See [`crate::load_env`].
pub fn load_config(args: &CliArgs, env_override: Option<&str>) -> anyhow::Result<PortalConfig> {
    let idl = Idl::from_file(&args.idl)?;
    let program = ProgramInterface::from_idl(&idl, &args.init_method, &args.append_method)
        .context("IDL doesn't match the portal program")?;

    let (base_account, source) = load_base_account(env_override, &args.keypair)?;

    let config = PortalConfig {
        rpc_url: args.url.clone(),
        commitment: CommitmentConfig::processed(),
        program,
        base_account,
        send_config: SendTransactionConfig {
            compute_budget: args.compute_budget,
            debug_logs: Some(true),
        },
    };

    print_kv!("Program", config.program.program_id, LogColor::Info);
    print_kv!("Base account", config.base_account_address(), LogColor::Info);
    if source == CredentialSource::BundledFile {
        print_kv!(
            "Warning",
            "base account credential is the bundled file; anyone with this build shares it",
            LogColor::Warning
        );
    }

    Ok(config)
}

pub fn load_wallet(args: &CliArgs) -> anyhow::Result<KeypairWallet> {
    let path = args
        .wallet
        .clone()
        .unwrap_or_else(load_env::default_wallet_path);
    KeypairWallet::from_file_or_absent(&path, args.trusted)
}
