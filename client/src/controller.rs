//! The session controller: connection, list and input state, and the
//! connect → fetch → initialize → submit workflow.
//!
//! Every state-changing operation takes `&mut self` across its await points, so the host can't
//! dispatch a second operation while one is in flight. Remote failures are logged and swallowed
//! here; nothing escapes to the caller.

use gif_portal_interface::state::GifItem;
use solana_address::Address;
use strum_macros::Display;

use crate::{
    logs::log_failure,
    notify::Notifier,
    print_kv,
    service::PortalService,
    view::{
        render,
        View,
    },
    wallet::{
        ConnectOptions,
        WalletProvider,
    },
    LogColor,
};

pub const EMPTY_INPUT_MESSAGE: &str = "Empty input. Try again.";

/// The locally known list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ItemList {
    /// No list has been fetched successfully. Distinct from a known, empty list.
    #[default]
    Uninitialized,
    Loaded(Vec<GifItem>),
}

/// How the most recent fetch ended. Both failure kinds leave the list [`ItemList::Uninitialized`]
/// and so show the same view; they're kept apart for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum FetchOutcome {
    Loaded,
    NotFound,
    Failed,
}

pub struct SessionController<W, S, N> {
    wallet: W,
    service: S,
    notifier: N,
    wallet_address: Option<Address>,
    input_value: String,
    item_list: ItemList,
    last_fetch: Option<FetchOutcome>,
}

impl<W, S, N> SessionController<W, S, N>
where
    W: WalletProvider,
    S: PortalService,
    N: Notifier,
{
    pub fn new(wallet: W, service: S, notifier: N) -> Self {
        Self {
            wallet,
            service,
            notifier,
            wallet_address: None,
            input_value: String::new(),
            item_list: ItemList::Uninitialized,
            last_fetch: None,
        }
    }

    pub fn wallet_address(&self) -> Option<&Address> {
        self.wallet_address.as_ref()
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    pub fn item_list(&self) -> &ItemList {
        &self.item_list
    }

    pub fn last_fetch(&self) -> Option<FetchOutcome> {
        self.last_fetch
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn view(&self) -> View<'_> {
        render(self.wallet_address.as_ref(), &self.item_list)
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input_value = value.into();
    }

    /// Reconnects without prompting if the wallet already trusts this front end. Run once at
    /// start-up. Never notifies the user.
    pub async fn attempt_silent_connect(&mut self) {
        if !self.wallet.is_available() {
            print_kv!("Wallet", "no provider found", LogColor::Warning);
            return;
        }
        if !self.wallet.is_trusted_extension() {
            print_kv!("Wallet", "provider isn't supported", LogColor::Warning);
            return;
        }

        let options = ConnectOptions {
            only_if_trusted: true,
        };
        match self.wallet.connect(options).await {
            Ok(address) => self.on_connected(address).await,
            Err(e) => log_failure("Silent connect", &e),
        }
    }

    /// User-initiated connect. The wallet may prompt.
    pub async fn connect(&mut self) {
        match self.wallet.connect(ConnectOptions::default()).await {
            Ok(address) => self.on_connected(address).await,
            Err(e) => log_failure("Connect", &e),
        }
    }

    /// Sets the address and fetches the list whenever the address actually changes.
    async fn on_connected(&mut self, address: Address) {
        print_kv!("Connected with public key", address, LogColor::Info);
        if self.wallet_address == Some(address) {
            return;
        }
        self.wallet_address = Some(address);
        print_kv!("Fetching", "GIF list", LogColor::Info);
        self.fetch_list().await;
    }

    /// Replaces the list with the remote account's contents. Any failure, including a missing
    /// account, resets the list to [`ItemList::Uninitialized`].
    pub async fn fetch_list(&mut self) {
        if self.wallet_address.is_none() {
            print_kv!("Fetch", "skipped, no wallet connected", LogColor::Warning);
            return;
        }

        let outcome = match self.service.fetch_base_account().await {
            Ok(Some(account)) => {
                print_kv!("Got the base account, gifs", account.gif_list.len(), LogColor::Info);
                self.item_list = ItemList::Loaded(account.gif_list);
                FetchOutcome::Loaded
            }
            Ok(None) => {
                print_kv!("Base account", "not initialized", LogColor::Warning);
                self.item_list = ItemList::Uninitialized;
                FetchOutcome::NotFound
            }
            Err(e) => {
                log_failure("Error getting gifs", &e);
                self.item_list = ItemList::Uninitialized;
                FetchOutcome::Failed
            }
        };
        self.last_fetch = Some(outcome);
    }

    /// Creates the list account, then fetches it once on success.
    pub async fn initialize_account(&mut self) {
        let Some(user) = self.wallet_address else {
            print_kv!("Initialize", "skipped, no wallet connected", LogColor::Warning);
            return;
        };
        if matches!(self.item_list, ItemList::Loaded(_)) {
            print_kv!("Initialize", "skipped, account already known", LogColor::Warning);
            return;
        }

        match self.service.initialize(&user, &self.wallet).await {
            Ok(signature) => {
                print_kv!("Created base account", signature, LogColor::Info);
                self.fetch_list().await;
            }
            Err(e) => log_failure("Error creating base account", &e),
        }
    }

    /// Submits the current input as a new link. Blank input raises a notification and sends
    /// nothing. On success the local list is left as it was; it's neither patched nor re-fetched.
    pub async fn submit_entry(&mut self) {
        if self.input_value.trim().is_empty() {
            self.notifier.alert(EMPTY_INPUT_MESSAGE);
            return;
        }
        let Some(user) = self.wallet_address else {
            print_kv!("Submit", "skipped, no wallet connected", LogColor::Warning);
            return;
        };
        if matches!(self.item_list, ItemList::Uninitialized) {
            print_kv!("Submit", "skipped, account not initialized", LogColor::Warning);
            return;
        }

        print_kv!("Gif link", self.input_value, LogColor::Info);
        match self
            .service
            .add_gif(&user, &self.wallet, &self.input_value)
            .await
        {
            Ok(signature) => print_kv!("Added gif", signature, LogColor::Info),
            Err(e) => log_failure("Failed to add gif", &e),
        }
    }
}
