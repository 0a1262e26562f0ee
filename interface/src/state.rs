//! The program's single list account and its entries.

use borsh::{
    BorshDeserialize,
    BorshSerialize,
};
use solana_address::Address;

use crate::{
    discriminator::{
        account_discriminator,
        DISCRIMINATOR_LEN,
    },
    error::InterfaceError,
};

/// One submitted link and the wallet that submitted it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GifItem {
    pub gif_link: String,
    pub user_address: Address,
}

/// The decoded base account. `gif_list` is kept in the order the program stored it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BaseAccount {
    pub total_gifs: u64,
    pub gif_list: Vec<GifItem>,
}

#[derive(BorshDeserialize, BorshSerialize)]
struct ItemLayout {
    gif_link: String,
    user_address: [u8; 32],
}

#[derive(BorshDeserialize, BorshSerialize)]
struct BaseAccountLayout {
    total_gifs: u64,
    gif_list: Vec<ItemLayout>,
}

impl BaseAccount {
    pub const ACCOUNT_NAME: &'static str = "BaseAccount";

    /// Decodes raw account data: the account discriminator followed by the Borsh body.
    ///
    /// The account is allocated with a fixed size larger than its contents, so anything after the
    /// Borsh body is ignored.
    pub fn try_from_account_data(data: &[u8]) -> Result<Self, InterfaceError> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(InterfaceError::InsufficientByteLength);
        }

        let (discriminator, mut body) = data.split_at(DISCRIMINATOR_LEN);
        if discriminator != account_discriminator(Self::ACCOUNT_NAME) {
            return Err(InterfaceError::InvalidAccountDiscriminant);
        }

        let layout = BaseAccountLayout::deserialize(&mut body)
            .or(Err(InterfaceError::InvalidAccountData))?;

        Ok(Self {
            total_gifs: layout.total_gifs,
            gif_list: layout
                .gif_list
                .into_iter()
                .map(|item| GifItem {
                    gif_link: item.gif_link,
                    user_address: Address::new_from_array(item.user_address),
                })
                .collect(),
        })
    }

    /// Encodes the account the way the program lays it out, discriminator included.
    pub fn to_account_data(&self) -> Vec<u8> {
        let layout = BaseAccountLayout {
            total_gifs: self.total_gifs,
            gif_list: self
                .gif_list
                .iter()
                .map(|item| ItemLayout {
                    gif_link: item.gif_link.clone(),
                    user_address: item.user_address.to_bytes(),
                })
                .collect(),
        };

        let mut data = account_discriminator(Self::ACCOUNT_NAME).to_vec();
        layout
            .serialize(&mut data)
            .expect("Writing to a Vec can't fail");
        data
    }
}
