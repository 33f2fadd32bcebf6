use std::str::FromStr;

use hdpath::StandardHDPath;
use log::debug;
use types::signer::Signer;
use utils::file::toml_file;

use crate::error::Error;
use crate::keyring::{
    account_address_bytes, decode_bech32_address, encode_bech32_address, CosmosKey,
    EncodedPubKey, Secp256k1KeyPair,
};

/// The relaying account on one chain: a mnemonic-derived secp256k1 key pair
/// plus its bech32 address.
#[derive(Debug, Clone)]
pub struct Secp256k1Account {
    key_pair: Secp256k1KeyPair,
    address_bytes: Vec<u8>,
    address: String,
}

impl Secp256k1Account {
    /// Build an account from a mnemonic alone, deriving the address.
    pub fn from_mnemonic(
        mnemonic: &str,
        hd_path: &str,
        account_prefix: &str,
    ) -> Result<Self, Error> {
        let s_hd_path =
            StandardHDPath::from_str(hd_path).map_err(|_e| Error::hd_path(hd_path.to_string()))?;

        let key_pair = Secp256k1KeyPair::from_mnemonic(mnemonic, &s_hd_path)?;
        let address_bytes = account_address_bytes(&key_pair.public_key);
        let address = encode_bech32_address(account_prefix, &address_bytes)?;

        Ok(Self {
            key_pair,
            address_bytes,
            address,
        })
    }

    /// Build an account from a key file, cross-checking the recorded public
    /// key and address against the mnemonic.
    pub fn from_key_file(key_path: &str, hd_path: &str) -> Result<Self, Error> {
        let cosmos_key: CosmosKey =
            toml_file::toml_file_read(key_path).map_err(Error::read_cosmos_key)?;

        let address_bytes = decode_bech32_address(&cosmos_key.address)?;

        let encoded_pub_key: EncodedPubKey = cosmos_key.pubkey.parse()?;
        debug!("key file public key: {:?}", encoded_pub_key.r#type);

        let s_hd_path =
            StandardHDPath::from_str(hd_path).map_err(|_e| Error::hd_path(hd_path.to_string()))?;

        let key_pair = Secp256k1KeyPair::from_mnemonic(&cosmos_key.mnemonic, &s_hd_path)?;
        let derived_pub_key_bytes = key_pair.public_key.serialize().to_vec();

        let mut encoded_pub_key_bytes = encoded_pub_key.key;
        let encoded_pub_key_bytes = encoded_pub_key_bytes
            .split_off(encoded_pub_key_bytes.len().saturating_sub(derived_pub_key_bytes.len()));
        if encoded_pub_key_bytes != derived_pub_key_bytes {
            return Err(Error::public_key_mismatch(cosmos_key.pubkey));
        }

        Ok(Self {
            key_pair,
            address_bytes,
            address: cosmos_key.address,
        })
    }

    pub fn key_pair(&self) -> &Secp256k1KeyPair {
        &self.key_pair
    }

    pub fn address_bytes(&self) -> &[u8] {
        &self.address_bytes
    }

    pub fn address(&self) -> String {
        self.address.clone()
    }

    pub fn message_sign(&self, message: &[u8]) -> Result<Vec<u8>, Error> {
        self.key_pair.sign(message)
    }

    pub fn get_signer(&self) -> Result<Signer, Error> {
        self.address
            .parse()
            .map_err(|e| Error::signer("account parse to signer error".to_string(), e))
    }
}

#[cfg(test)]
pub mod account_tests {
    use super::Secp256k1Account;
    use crate::keyring::keyring_tests::TEST_MNEMONIC;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    pub fn account_from_mnemonic_works() {
        init();
        let account =
            Secp256k1Account::from_mnemonic(TEST_MNEMONIC, "m/44'/118'/0'/0/0", "cosmos")
                .expect("account error!");

        assert!(account.address().starts_with("cosmos1"));
        assert_eq!(account.address_bytes().len(), 20);
        assert!(account.get_signer().is_ok());
    }

    #[test]
    pub fn bad_hd_path_fails() {
        let result = Secp256k1Account::from_mnemonic(TEST_MNEMONIC, "not-a-path", "cosmos");
        assert!(result.is_err());
    }
}
