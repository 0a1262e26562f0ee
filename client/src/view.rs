//! The three views the front end can show, derived from session state alone.

use std::fmt;

use gif_portal_interface::state::GifItem;
use solana_address::Address;

use crate::controller::ItemList;

pub const CONNECT_BUTTON: &str = "Connect to Wallet";
pub const INITIALIZE_BUTTON: &str = "Do One-Time Initialization For GIF Program Account";
pub const INPUT_PLACEHOLDER: &str = "Enter gif link!";
pub const SUBMIT_BUTTON: &str = "Submit";

#[derive(Debug, PartialEq, Eq)]
pub enum View<'a> {
    /// No wallet connected.
    ConnectPrompt,
    /// Wallet connected but no list is known.
    InitializePrompt,
    /// Wallet connected and the list is known: submission form plus the grid.
    Portal { gifs: &'a [GifItem] },
}

/// The view for a given `(wallet_address, item_list)`. Nothing else is consulted.
pub fn render<'a>(wallet_address: Option<&Address>, item_list: &'a ItemList) -> View<'a> {
    match (wallet_address, item_list) {
        (None, _) => View::ConnectPrompt,
        (Some(_), ItemList::Uninitialized) => View::InitializePrompt,
        (Some(_), ItemList::Loaded(gifs)) => View::Portal { gifs },
    }
}

impl View<'_> {
    /// The image links in grid order. Empty for the prompt views.
    pub fn grid(&self) -> Vec<&str> {
        match self {
            View::Portal { gifs } => gifs.iter().map(|g| g.gif_link.as_str()).collect(),
            _ => vec![],
        }
    }
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::ConnectPrompt => writeln!(f, "[ {CONNECT_BUTTON} ]"),
            View::InitializePrompt => writeln!(f, "[ {INITIALIZE_BUTTON} ]"),
            View::Portal { gifs } => {
                writeln!(f, "[ {INPUT_PLACEHOLDER} ] [ {SUBMIT_BUTTON} ]")?;
                if gifs.is_empty() {
                    return writeln!(f, "  (no gifs yet)");
                }
                for (i, gif) in gifs.iter().enumerate() {
                    writeln!(f, "  {:>3}. {}", i + 1, gif.gif_link)?;
                }
                Ok(())
            }
        }
    }
}
