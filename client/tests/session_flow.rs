use std::{
    collections::VecDeque,
    sync::Mutex,
};

use anyhow::anyhow;
use async_trait::async_trait;
use client::{
    controller::EMPTY_INPUT_MESSAGE,
    notify::Notifier,
    service::PortalService,
    view::View,
    wallet::{
        ConnectOptions,
        WalletProvider,
    },
    FetchOutcome,
    ItemList,
    SessionController,
};
use gif_portal_interface::state::{
    BaseAccount,
    GifItem,
};
use solana_address::Address;
use solana_sdk::{
    signature::Signature,
    transaction::Transaction,
};

struct TestWallet {
    available: bool,
    trusted: bool,
    fail_with: Option<String>,
    address: Address,
    connects: Mutex<Vec<ConnectOptions>>,
}

impl TestWallet {
    fn ok(trusted: bool) -> Self {
        Self {
            available: true,
            trusted,
            fail_with: None,
            address: Address::new_unique(),
            connects: Mutex::new(Vec::new()),
        }
    }

    fn absent() -> Self {
        Self {
            available: false,
            ..Self::ok(false)
        }
    }

    fn failing(err: impl Into<String>) -> Self {
        Self {
            fail_with: Some(err.into()),
            ..Self::ok(true)
        }
    }

    fn connects(&self) -> Vec<ConnectOptions> {
        self.connects.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletProvider for TestWallet {
    fn is_available(&self) -> bool {
        self.available
    }

    fn is_trusted_extension(&self) -> bool {
        self.available
    }

    async fn connect(&self, options: ConnectOptions) -> anyhow::Result<Address> {
        self.connects.lock().unwrap().push(options);
        if !self.available {
            return Err(anyhow!("no provider"));
        }
        if let Some(err) = &self.fail_with {
            return Err(anyhow!(err.clone()));
        }
        if options.only_if_trusted && !self.trusted {
            return Err(anyhow!("not trusted"));
        }
        Ok(self.address)
    }

    async fn sign_transaction(&self, transaction: Transaction) -> anyhow::Result<Transaction> {
        Ok(transaction)
    }
}

#[derive(Clone)]
enum FetchResponse {
    Account(Vec<&'static str>),
    NotFound,
    Error,
}

struct TestService {
    fetch_responses: Mutex<VecDeque<FetchResponse>>,
    fail_writes: bool,
    fetches: Mutex<u32>,
    initializes: Mutex<Vec<Address>>,
    added: Mutex<Vec<(Address, String)>>,
}

impl TestService {
    fn new(responses: impl IntoIterator<Item = FetchResponse>) -> Self {
        Self {
            fetch_responses: Mutex::new(responses.into_iter().collect()),
            fail_writes: false,
            fetches: Mutex::new(0),
            initializes: Mutex::new(Vec::new()),
            added: Mutex::new(Vec::new()),
        }
    }

    fn failing_writes(responses: impl IntoIterator<Item = FetchResponse>) -> Self {
        Self {
            fail_writes: true,
            ..Self::new(responses)
        }
    }

    fn fetches(&self) -> u32 {
        *self.fetches.lock().unwrap()
    }

    fn initializes(&self) -> Vec<Address> {
        self.initializes.lock().unwrap().clone()
    }

    fn added(&self) -> Vec<(Address, String)> {
        self.added.lock().unwrap().clone()
    }
}

#[async_trait]
impl PortalService for TestService {
    async fn fetch_base_account(&self) -> anyhow::Result<Option<BaseAccount>> {
        *self.fetches.lock().unwrap() += 1;
        let response = self
            .fetch_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(FetchResponse::NotFound);

        match response {
            FetchResponse::Account(links) => Ok(Some(BaseAccount {
                total_gifs: links.len() as u64,
                gif_list: links
                    .into_iter()
                    .map(|link| GifItem {
                        gif_link: link.into(),
                        user_address: Address::new_unique(),
                    })
                    .collect(),
            })),
            FetchResponse::NotFound => Ok(None),
            FetchResponse::Error => Err(anyhow!("connection refused")),
        }
    }

    async fn initialize(
        &self,
        user: &Address,
        _wallet: &dyn WalletProvider,
    ) -> anyhow::Result<Signature> {
        self.initializes.lock().unwrap().push(*user);
        if self.fail_writes {
            return Err(anyhow!("simulation failed"));
        }
        Ok(Signature::default())
    }

    async fn add_gif(
        &self,
        user: &Address,
        _wallet: &dyn WalletProvider,
        gif_link: &str,
    ) -> anyhow::Result<Signature> {
        self.added.lock().unwrap().push((*user, gif_link.into()));
        if self.fail_writes {
            return Err(anyhow!("simulation failed"));
        }
        Ok(Signature::default())
    }
}

#[derive(Default)]
struct TestNotifier {
    alerts: Mutex<Vec<String>>,
}

impl TestNotifier {
    fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for TestNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.into());
    }
}

type TestController = SessionController<TestWallet, TestService, TestNotifier>;

fn controller(wallet: TestWallet, service: TestService) -> TestController {
    SessionController::new(wallet, service, TestNotifier::default())
}

fn links(list: &ItemList) -> Vec<&str> {
    match list {
        ItemList::Loaded(gifs) => gifs.iter().map(|g| g.gif_link.as_str()).collect(),
        ItemList::Uninitialized => panic!("list should be loaded"),
    }
}

#[tokio::test]
async fn silent_connect_without_provider_is_silent() {
    let mut ctl = controller(TestWallet::absent(), TestService::new([]));
    ctl.attempt_silent_connect().await;

    assert_eq!(ctl.wallet_address(), None);
    assert_eq!(ctl.view(), View::ConnectPrompt);
    assert!(ctl.wallet().connects().is_empty());
    assert!(ctl.notifier().alerts().is_empty());
    assert_eq!(ctl.service().fetches(), 0);
}

#[tokio::test]
async fn explicit_connect_without_provider_fails_quietly() {
    let mut ctl = controller(TestWallet::absent(), TestService::new([]));
    ctl.connect().await;

    assert_eq!(ctl.wallet_address(), None);
    assert!(ctl.notifier().alerts().is_empty());
    assert_eq!(ctl.service().fetches(), 0);
}

#[tokio::test]
async fn silent_connect_uses_only_if_trusted() {
    let mut ctl = controller(
        TestWallet::ok(true),
        TestService::new([FetchResponse::Account(vec![])]),
    );
    ctl.attempt_silent_connect().await;

    let address = ctl.wallet().address;
    assert_eq!(
        ctl.wallet().connects(),
        [ConnectOptions {
            only_if_trusted: true
        }]
    );
    assert_eq!(ctl.wallet_address(), Some(&address));
    assert_eq!(ctl.service().fetches(), 1);
}

#[tokio::test]
async fn untrusted_silent_connect_leaves_state_alone() {
    let mut ctl = controller(TestWallet::ok(false), TestService::new([]));
    ctl.attempt_silent_connect().await;

    assert_eq!(ctl.wallet_address(), None);
    assert_eq!(ctl.service().fetches(), 0);
    assert!(ctl.notifier().alerts().is_empty());
}

#[tokio::test]
async fn connect_fetches_exactly_once() {
    let mut ctl = controller(
        TestWallet::ok(false),
        TestService::new([FetchResponse::Account(vec!["https://a"])]),
    );
    ctl.connect().await;

    let address = ctl.wallet().address;
    assert_eq!(ctl.wallet_address(), Some(&address));
    assert_eq!(
        ctl.wallet().connects(),
        [ConnectOptions {
            only_if_trusted: false
        }]
    );
    assert_eq!(ctl.service().fetches(), 1);
    assert_eq!(ctl.last_fetch(), Some(FetchOutcome::Loaded));

    // Reconnecting with the same address isn't a transition, so no second fetch.
    ctl.connect().await;
    assert_eq!(ctl.service().fetches(), 1);
}

#[tokio::test]
async fn connect_failure_stays_disconnected() {
    let mut ctl = controller(TestWallet::failing("user rejected"), TestService::new([]));
    ctl.connect().await;

    assert_eq!(ctl.wallet_address(), None);
    assert_eq!(ctl.view(), View::ConnectPrompt);
    assert_eq!(ctl.service().fetches(), 0);
    assert!(ctl.notifier().alerts().is_empty());
}

#[tokio::test]
async fn not_found_shows_only_initialize_prompt() {
    let mut ctl = controller(
        TestWallet::ok(false),
        TestService::new([FetchResponse::NotFound]),
    );
    ctl.connect().await;

    assert_eq!(ctl.item_list(), &ItemList::Uninitialized);
    assert_eq!(ctl.last_fetch(), Some(FetchOutcome::NotFound));
    let view = ctl.view();
    assert_eq!(view, View::InitializePrompt);
    assert!(view.grid().is_empty());
}

#[tokio::test]
async fn fetch_errors_collapse_to_uninitialized() {
    let mut ctl = controller(
        TestWallet::ok(false),
        TestService::new([
            FetchResponse::Account(vec!["https://a"]),
            FetchResponse::Error,
            FetchResponse::Account(vec![]),
            FetchResponse::NotFound,
        ]),
    );
    ctl.connect().await;
    assert_eq!(links(ctl.item_list()), ["https://a"]);

    ctl.fetch_list().await;
    assert_eq!(ctl.item_list(), &ItemList::Uninitialized);
    assert_eq!(ctl.last_fetch(), Some(FetchOutcome::Failed));
    assert_eq!(ctl.view(), View::InitializePrompt);

    ctl.fetch_list().await;
    assert_eq!(ctl.item_list(), &ItemList::Loaded(vec![]));

    ctl.fetch_list().await;
    assert_eq!(ctl.item_list(), &ItemList::Uninitialized);
    assert_eq!(ctl.last_fetch(), Some(FetchOutcome::NotFound));
}

#[tokio::test]
async fn empty_account_shows_form_and_empty_grid() {
    let mut ctl = controller(
        TestWallet::ok(false),
        TestService::new([FetchResponse::Account(vec![])]),
    );
    ctl.connect().await;

    assert_eq!(ctl.view(), View::Portal { gifs: &[] });
    assert!(ctl.view().to_string().contains("Submit"));
}

#[tokio::test]
async fn grid_renders_in_remote_order() {
    let mut ctl = controller(
        TestWallet::ok(false),
        TestService::new([FetchResponse::Account(vec!["https://a", "https://b"])]),
    );
    ctl.connect().await;

    assert_eq!(ctl.view().grid(), ["https://a", "https://b"]);
}

#[tokio::test]
async fn initialize_success_fetches_once_more() {
    let mut ctl = controller(
        TestWallet::ok(false),
        TestService::new([FetchResponse::NotFound, FetchResponse::Account(vec![])]),
    );
    ctl.connect().await;
    assert_eq!(ctl.service().fetches(), 1);

    ctl.initialize_account().await;
    let address = ctl.wallet().address;
    assert_eq!(ctl.service().initializes(), [address]);
    assert_eq!(ctl.service().fetches(), 2);
    assert_eq!(ctl.view(), View::Portal { gifs: &[] });
}

#[tokio::test]
async fn initialize_failure_allows_retry() {
    let mut ctl = controller(
        TestWallet::ok(false),
        TestService::failing_writes([FetchResponse::NotFound]),
    );
    ctl.connect().await;

    ctl.initialize_account().await;
    assert_eq!(ctl.service().fetches(), 1);
    assert_eq!(ctl.view(), View::InitializePrompt);

    ctl.initialize_account().await;
    assert_eq!(ctl.service().initializes().len(), 2);
    assert!(ctl.notifier().alerts().is_empty());
}

#[tokio::test]
async fn initialize_is_skipped_once_list_is_known() {
    let mut ctl = controller(
        TestWallet::ok(false),
        TestService::new([FetchResponse::Account(vec![])]),
    );
    ctl.initialize_account().await;
    assert!(ctl.service().initializes().is_empty());

    ctl.connect().await;
    ctl.initialize_account().await;
    assert!(ctl.service().initializes().is_empty());
}

#[tokio::test]
async fn blank_input_alerts_without_remote_call() {
    let mut ctl = controller(
        TestWallet::ok(false),
        TestService::new([FetchResponse::Account(vec![])]),
    );
    ctl.connect().await;

    for blank in ["", "   ", "\t\n"] {
        ctl.set_input(blank);
        ctl.submit_entry().await;
        assert_eq!(ctl.input_value(), blank);
    }

    assert!(ctl.service().added().is_empty());
    assert_eq!(ctl.notifier().alerts(), vec![EMPTY_INPUT_MESSAGE; 3]);
}

#[tokio::test]
async fn submit_does_not_refetch_or_reset_input() {
    let mut ctl = controller(
        TestWallet::ok(false),
        TestService::new([
            FetchResponse::Account(vec!["https://a"]),
            FetchResponse::Account(vec!["https://a", "https://b"]),
        ]),
    );
    ctl.connect().await;

    ctl.set_input("https://b");
    ctl.submit_entry().await;

    let address = ctl.wallet().address;
    assert_eq!(ctl.service().added(), [(address, "https://b".to_string())]);
    assert_eq!(ctl.service().fetches(), 1);
    assert_eq!(ctl.input_value(), "https://b");
    assert_eq!(links(ctl.item_list()), ["https://a"]);
    assert!(ctl.notifier().alerts().is_empty());
}

#[tokio::test]
async fn submit_failure_is_logged_only() {
    let mut ctl = controller(
        TestWallet::ok(false),
        TestService::failing_writes([FetchResponse::Account(vec![])]),
    );
    ctl.connect().await;

    ctl.set_input("https://a");
    ctl.submit_entry().await;

    assert_eq!(ctl.service().added().len(), 1);
    assert_eq!(ctl.item_list(), &ItemList::Loaded(vec![]));
    assert!(ctl.notifier().alerts().is_empty());
}

#[tokio::test]
async fn submit_before_initialize_sends_nothing() {
    let mut ctl = controller(
        TestWallet::ok(false),
        TestService::new([FetchResponse::NotFound]),
    );
    ctl.connect().await;

    ctl.set_input("https://a");
    ctl.submit_entry().await;

    assert!(ctl.service().added().is_empty());
    assert_eq!(ctl.item_list(), &ItemList::Uninitialized);
    assert!(ctl.notifier().alerts().is_empty());
}
