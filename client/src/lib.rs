//! Client-side session for the GIF portal: wallet and program seams, the session controller, and
//! the views it drives.

pub mod config;
pub mod controller;
pub mod logs;
pub mod notify;
pub mod service;
pub mod transactions;
pub mod view;
pub mod wallet;

pub use controller::{
    FetchOutcome,
    ItemList,
    SessionController,
};
pub use logs::LogColor;
