//! Client-side interface to the GIF portal program: the IDL document, Anchor-compatible
//! discriminators, instruction builders, and the base account layout.

pub mod discriminator;
pub mod error;
pub mod idl;
pub mod instructions;
pub mod state;

pub use idl::ProgramInterface;
