use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address_with_program_id;

use super::AssociatedAddressResolver;

/// Résolveur ATA standard (programme SPL Token classique par défaut).
#[derive(Debug, Clone, Copy)]
pub struct SplAssociatedTokenResolver {
    token_program_id: Pubkey,
}

impl SplAssociatedTokenResolver {
    pub fn with_token_program(token_program_id: Pubkey) -> Self {
        Self { token_program_id }
    }
}

impl Default for SplAssociatedTokenResolver {
    fn default() -> Self {
        Self::with_token_program(spl_token::ID)
    }
}

impl AssociatedAddressResolver for SplAssociatedTokenResolver {
    fn resolve(&self, mint: &Pubkey, owner: &Pubkey) -> Pubkey {
        get_associated_token_address_with_program_id(owner, mint, &self.token_program_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_pipeline::registry::{BANK_KEY, CRATE_TOKEN};
    use std::str::FromStr;

    fn key(s: &str) -> Pubkey {
        Pubkey::from_str(s).unwrap()
    }

    #[test]
    fn resolves_known_treasury_and_vault_accounts() {
        let resolver = SplAssociatedTokenResolver::default();
        let usd9 = key("USD9oeJpVZ8XXF9L884ZEsw7VXTSguNXboxsEi1fHrE");

        assert_eq!(
            resolver.resolve(&usd9, &key(BANK_KEY)),
            key("D67ZNjaRERdc7Ej8SjbpyGwJT4MnadgzfGnwgCmMJAa1")
        );
        assert_eq!(
            resolver.resolve(&usd9, &key(CRATE_TOKEN)),
            key("CJdU6oLxuzuDffqtrzv3YvQjdjQ7egCkuRshwmKXNYjM")
        );
        assert_eq!(
            resolver.resolve(&key("SRYWvj5Xw1UoivpdfJN4hFZU1qbtceMvfM5nBc3PsRC"), &key(BANK_KEY)),
            key("7xm1b8ZcharzxxqJUTeu4LtnVK1u65599f9wSRxzUwNf")
        );
    }

    #[test]
    fn owner_and_mint_are_not_interchangeable() {
        let resolver = SplAssociatedTokenResolver::default();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        assert_ne!(resolver.resolve(&a, &b), resolver.resolve(&b, &a));
        assert_eq!(resolver.resolve(&a, &b), resolver.resolve(&a, &b));
    }
}
