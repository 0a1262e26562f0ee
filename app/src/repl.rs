//! Line-oriented host loop: each line is one user action, and the view is re-rendered after it.

use std::str::FromStr;

use client::{
    notify::Notifier,
    service::PortalService,
    view::{
        View,
        INPUT_PLACEHOLDER,
    },
    wallet::WalletProvider,
    LogColor,
    SessionController,
};
use colored::Colorize;
use strum_macros::Display;

#[derive(Clone, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Command {
    Connect,
    Init,
    /// Replaces the input field's contents; the text may be empty.
    Input(String),
    /// Submits the input field, optionally replacing its contents first.
    Submit(Option<String>),
    Refresh,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.trim_start().split_once(' ') {
            Some((word, rest)) => (word, Some(rest)),
            None => (line.trim(), None),
        };

        Ok(match word {
            "connect" => Command::Connect,
            "init" => Command::Init,
            "input" => Command::Input(rest.unwrap_or_default().to_string()),
            "submit" => Command::Submit(rest.map(str::to_string)),
            "refresh" => Command::Refresh,
            "" | "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => anyhow::bail!("Unknown command `{other}`. Type `help` for a list."),
        })
    }
}

pub const HEADER: &str = "🖼 GIF Portal";
pub const SUB_TEXT: &str = "View your GIF collection in the metaverse ✨";

/// Applies one command. Returns `false` once the user asked to quit.
pub async fn dispatch<W, S, N>(ctl: &mut SessionController<W, S, N>, command: Command) -> bool
where
    W: WalletProvider,
    S: PortalService,
    N: Notifier,
{
    match command {
        Command::Connect => ctl.connect().await,
        Command::Init => ctl.initialize_account().await,
        Command::Input(text) => ctl.set_input(text),
        Command::Submit(text) => {
            if let Some(text) = text {
                ctl.set_input(text);
            }
            ctl.submit_entry().await;
        }
        Command::Refresh => ctl.fetch_list().await,
        Command::Show => {}
        Command::Help => print_help(&ctl.view()),
        Command::Quit => return false,
    }
    true
}

pub fn render_screen<W, S, N>(ctl: &SessionController<W, S, N>) -> String
where
    W: WalletProvider,
    S: PortalService,
    N: Notifier,
{
    let view = ctl.view();
    let mut screen = format!(
        "{}\n{}\n{view}",
        HEADER.color(LogColor::Header).bold(),
        SUB_TEXT.color(LogColor::FadedGray),
    );
    if let View::Portal { .. } = view {
        let input = if ctl.input_value().is_empty() {
            INPUT_PLACEHOLDER.color(LogColor::FadedGray).to_string()
        } else {
            ctl.input_value().to_string()
        };
        screen.push_str(&format!("input> {input}\n"));
    }
    screen
}

fn print_help(view: &View) {
    let actions = match view {
        View::ConnectPrompt => "connect",
        View::InitializePrompt => "init, refresh",
        View::Portal { .. } => "input <link>, submit [link], refresh",
    };
    println!("actions: {actions}");
    println!("always:  show, help, quit");
}
