//! Terminal front end for the GIF portal.
//!
//! Reconnects to a previously approved wallet on start-up, then reads one action per line from
//! stdin and re-renders the view after each.

use std::io::{
    BufRead,
    Write,
};

use clap::Parser;
use client::{
    notify::TerminalNotifier,
    print_kv,
    service::RpcPortalService,
    LogColor,
    SessionController,
};

use crate::{
    cli::CliArgs,
    repl::{
        dispatch,
        render_screen,
        Command,
    },
};

pub mod cli;
pub mod load_env;
pub mod repl;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let env_override = load_env::base_account_override();
    let config = cli::load_config(&args, env_override.as_deref())?;
    let wallet = cli::load_wallet(&args)?;

    let mut ctl = SessionController::new(wallet, RpcPortalService::new(config), TerminalNotifier);

    ctl.attempt_silent_connect().await;
    print!("{}", render_screen(&ctl));

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        // Don't hold the stdin lock across iterations; the notifier reads from it too.
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                print_kv!("Error", e, LogColor::Error);
                continue;
            }
        };
        if !matches!(command, Command::Show | Command::Help) {
            print_kv!("Action", command, LogColor::Highlight);
        }

        if !dispatch(&mut ctl, command).await {
            break;
        }
        print!("{}", render_screen(&ctl));
    }

    Ok(())
}
