//! Errors raised while decoding program account data.

#[derive(Clone, Debug, Eq, PartialEq, strum_macros::Display)]
#[repr(u8)]
pub enum InterfaceError {
    InsufficientByteLength,
    InvalidAccountDiscriminant,
    InvalidAccountData,
}

impl std::error::Error for InterfaceError {}
