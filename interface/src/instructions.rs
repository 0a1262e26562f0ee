//! Builders for the two program instructions the client issues.

use borsh::BorshSerialize;
use solana_address::Address;
use solana_instruction::{
    AccountMeta,
    Instruction,
};

use crate::idl::ProgramInterface;

/// Accounts for the account-creation instruction.
pub struct Initialize {
    /// The base account being created. Must sign.
    pub base_account: Address,
    /// The fee payer funding the new account.
    pub user: Address,
}

/// Accounts for the append instruction.
pub struct AddGif {
    pub base_account: Address,
    /// The wallet submitting the link. Must sign.
    pub user: Address,
}

impl Initialize {
    pub fn create_instruction(&self, program: &ProgramInterface) -> Instruction {
        Instruction {
            program_id: program.program_id,
            accounts: vec![
                AccountMeta::new(self.base_account, true),
                AccountMeta::new(self.user, true),
                AccountMeta::new_readonly(solana_system_interface::program::ID, false),
            ],
            data: program.initialize.discriminator.to_vec(),
        }
    }
}

impl AddGif {
    pub fn create_instruction(&self, program: &ProgramInterface, gif_link: &str) -> Instruction {
        let mut data = program.add_gif.discriminator.to_vec();
        gif_link
            .to_string()
            .serialize(&mut data)
            .expect("Writing to a Vec can't fail");

        Instruction {
            program_id: program.program_id,
            accounts: vec![
                AccountMeta::new(self.base_account, false),
                AccountMeta::new(self.user, true),
            ],
            data,
        }
    }
}
