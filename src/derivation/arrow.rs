use solana_sdk::pubkey::Pubkey;

use super::AddressDeriver;
use crate::decoders::arrow::ARROW_PROGRAM_ID;

const ARROW_SEED: &[u8] = b"arrow";

/// Retourne le PDA Arrow d'un mint et son bump.
pub fn find_arrow_address(mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ARROW_SEED, mint.as_ref()], program_id)
}

#[derive(Debug, Clone, Copy)]
pub struct ArrowAddressDeriver {
    program_id: Pubkey,
}

impl ArrowAddressDeriver {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }
}

impl Default for ArrowAddressDeriver {
    fn default() -> Self {
        Self::new(ARROW_PROGRAM_ID)
    }
}

impl AddressDeriver for ArrowAddressDeriver {
    fn derive(&self, mint: &Pubkey) -> Pubkey {
        find_arrow_address(mint, &self.program_id).0
    }
}
