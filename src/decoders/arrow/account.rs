// DANS : src/decoders/arrow/account.rs

use bytemuck::{Pod, Zeroable};
use solana_sdk::{account::Account, pubkey::Pubkey};

use crate::decoders::AccountDecoder;
use crate::error::DecodeError;

// --- CONSTANTES DU PROTOCOLE ---
pub const ARROW_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("ARoWLTBWoWrKMvxEiaE2EH9DrWyV7mLpKywGDWxBGeq9");
// sha256("account:Arrow")[..8]
pub const ARROW_ACCOUNT_DISCRIMINATOR: [u8; 8] = [143, 90, 115, 182, 243, 22, 37, 94];

/// Un compte Arrow décodé. `pool` vaut `None` quand le champ on-chain est la clé nulle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedArrow {
    pub address: Pubkey,
    pub mint: Pubkey,
    pub bump: u8,
    pub beneficiary: Pubkey,
    pub pool: Option<Pubkey>,
    pub vault: Pubkey,
}

impl DecodedArrow {
    /// Sérialise l'en-tête au format on-chain (discriminateur compris).
    /// Sert aux fixtures : le reste du compte (mineurs) n'est pas reproduit.
    pub fn to_account_data(&self) -> Vec<u8> {
        let header = onchain_layouts::ArrowHeader {
            mint: self.mint.to_bytes(),
            bump: self.bump,
            beneficiary: self.beneficiary.to_bytes(),
            pool: self.pool.unwrap_or_default().to_bytes(),
            vault: self.vault.to_bytes(),
        };
        let mut data = ARROW_ACCOUNT_DISCRIMINATOR.to_vec();
        data.extend_from_slice(bytemuck::bytes_of(&header));
        data
    }
}

// --- STRUCTURES ON-CHAIN ---
// Seul le préfixe du compte nous intéresse ; les mineurs qui suivent sont ignorés.
pub mod onchain_layouts {
    use super::*;

    #[repr(C, packed)]
    #[derive(Clone, Copy, Pod, Zeroable, Debug)]
    pub struct ArrowHeader {
        pub mint: [u8; 32],
        pub bump: u8,
        pub beneficiary: [u8; 32],
        pub pool: [u8; 32],
        pub vault: [u8; 32],
    }
}

/// Tente de décoder les données brutes d'un compte Arrow.
pub fn decode_arrow(address: &Pubkey, data: &[u8]) -> Result<DecodedArrow, DecodeError> {
    if data.get(..8) != Some(&ARROW_ACCOUNT_DISCRIMINATOR[..]) {
        return Err(DecodeError::InvalidDiscriminator {
            found: hex::encode(&data[..data.len().min(8)]),
        });
    }

    let header_len = std::mem::size_of::<onchain_layouts::ArrowHeader>();
    let data_slice = &data[8..];
    if data_slice.len() < header_len {
        return Err(DecodeError::DataTooShort {
            expected: 8 + header_len,
            actual: data.len(),
        });
    }

    let header: &onchain_layouts::ArrowHeader = bytemuck::from_bytes(&data_slice[..header_len]);
    let pool = Pubkey::new_from_array(header.pool);

    Ok(DecodedArrow {
        address: *address,
        mint: Pubkey::new_from_array(header.mint),
        bump: header.bump,
        beneficiary: Pubkey::new_from_array(header.beneficiary),
        pool: (pool != Pubkey::default()).then_some(pool),
        vault: Pubkey::new_from_array(header.vault),
    })
}

/// Décodeur Arrow. Par défaut, vérifie aussi que le compte appartient au programme Arrow.
#[derive(Debug, Clone, Copy)]
pub struct ArrowDecoder {
    expected_owner: Option<Pubkey>,
}

impl ArrowDecoder {
    pub fn new(expected_owner: Pubkey) -> Self {
        Self { expected_owner: Some(expected_owner) }
    }

    pub fn without_owner_check() -> Self {
        Self { expected_owner: None }
    }
}

impl Default for ArrowDecoder {
    fn default() -> Self {
        Self::new(ARROW_PROGRAM_ID)
    }
}

impl AccountDecoder for ArrowDecoder {
    fn decode(&self, address: &Pubkey, account: &Account) -> Result<DecodedArrow, DecodeError> {
        if let Some(expected) = self.expected_owner
            && account.owner != expected
        {
            return Err(DecodeError::WrongOwner {
                expected,
                actual: account.owner,
            });
        }
        decode_arrow(address, &account.data)
    }
}
