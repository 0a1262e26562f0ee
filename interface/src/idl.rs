//! The program interface document (Anchor IDL) and the subset of it the client relies on.
//!
//! Both the legacy layout (`metadata.address`) and the current Anchor layout (top-level `address`)
//! are accepted for the program id.

use std::{
    path::Path,
    str::FromStr,
};

use anyhow::{
    anyhow,
    bail,
    Context,
};
use serde::Deserialize;
use solana_address::Address;

use crate::discriminator::{
    instruction_discriminator,
    Discriminator,
};

#[derive(Clone, Debug, Deserialize)]
pub struct Idl {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub instructions: Vec<IdlInstruction>,
    #[serde(default)]
    pub metadata: Option<IdlMetadata>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct IdlMetadata {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    #[serde(default)]
    pub args: Vec<IdlField>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct IdlField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: serde_json::Value,
}

impl FromStr for Idl {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).context("Invalid IDL JSON")
    }
}

impl Idl {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Couldn't read IDL at {}", path.display()))?;
        contents.parse()
    }

    pub fn program_id(&self) -> anyhow::Result<Address> {
        let address = self
            .address
            .as_deref()
            .or(self.metadata.as_ref().and_then(|m| m.address.as_deref()))
            .ok_or(anyhow!("IDL has no program address"))?;

        Address::from_str(address)
            .map_err(|e| anyhow!("Invalid program address {address} in IDL: {e:?}"))
    }

    pub fn instruction(&self, name: &str) -> Option<&IdlInstruction> {
        self.instructions.iter().find(|ixn| ixn.name == name)
    }
}

/// The resolved program interface: the program id and the two instructions this client issues.
#[derive(Clone, Debug)]
pub struct ProgramInterface {
    pub program_id: Address,
    /// Creates the base account. Takes no arguments.
    pub initialize: InstructionSpec,
    /// Appends one link to the base account. Takes a single string argument.
    pub add_gif: InstructionSpec,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionSpec {
    pub name: String,
    pub discriminator: Discriminator,
}

impl InstructionSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            discriminator: instruction_discriminator(name),
        }
    }
}

pub const DEFAULT_INITIALIZE_METHOD: &str = "initialize";
pub const DEFAULT_ADD_GIF_METHOD: &str = "addGif";

impl ProgramInterface {
    /// Resolves the program id and validates the shape of the named instructions against the IDL.
    pub fn from_idl(idl: &Idl, initialize_name: &str, add_gif_name: &str) -> anyhow::Result<Self> {
        let program_id = idl.program_id()?;

        let init = idl
            .instruction(initialize_name)
            .ok_or(anyhow!("IDL has no instruction named `{initialize_name}`"))?;
        if !init.args.is_empty() {
            bail!(
                "Instruction `{initialize_name}` takes {} args, expected none",
                init.args.len()
            );
        }

        let add = idl
            .instruction(add_gif_name)
            .ok_or(anyhow!("IDL has no instruction named `{add_gif_name}`"))?;
        match add.args.as_slice() {
            [arg] if arg.ty == serde_json::Value::String("string".into()) => {}
            args => bail!(
                "Instruction `{add_gif_name}` must take exactly one string arg, found {args:?}"
            ),
        }

        Ok(Self {
            program_id,
            initialize: InstructionSpec::new(initialize_name),
            add_gif: InstructionSpec::new(add_gif_name),
        })
    }
}
