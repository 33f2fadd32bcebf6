use std::str::FromStr;

use bip39::{Language, Mnemonic, Seed};
use bitcoin::bip32::{ChildNumber, DerivationPath, ExtendedPrivKey, ExtendedPubKey};
use bitcoin::hashes::{hash160, Hash};
use bitcoin::Network;
use hdpath::StandardHDPath;
use secp256k1::ecdsa::Signature;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use serde::{Deserialize, Deserializer, Serialize};
use subtle_encoding::base64;
use utils::encode::bech32;

use crate::error::Error;

/// A key file as produced by `gaiad keys add --output json`, with the
/// mnemonic appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CosmosKey {
    pub name: String,
    pub r#type: String,
    pub address: String,
    pub pubkey: String,
    pub mnemonic: String,
}

#[derive(Debug, Deserialize)]
pub struct EncodedPubKey {
    #[serde(alias = "@type")]
    pub r#type: String,
    #[serde(deserialize_with = "deserialize_key")]
    pub key: Vec<u8>,
}

/// The `key` field is a byte array that is base64-encoded and then
/// marshalled into a JSON String.
fn deserialize_key<'de, D>(deser: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let base64_encoded: Result<String, _> = Deserialize::deserialize(deser);
    let value = base64::decode(base64_encoded?)
        .map_err(|e| serde::de::Error::custom(format!("error in decoding: {e}")))?;

    Ok(value)
}

impl FromStr for EncodedPubKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let maybe_json: Result<EncodedPubKey, _> = serde_json::from_str(s);
        maybe_json.map_err(|e| Error::encoded_public_key(e))
    }
}

pub fn private_key_from_mnemonic(
    mnemonic_words: &str,
    hd_path: &StandardHDPath,
) -> Result<ExtendedPrivKey, Error> {
    let mnemonic = Mnemonic::from_phrase(mnemonic_words, Language::English)
        .map_err(Error::invalid_mnemonic)?;

    let seed = Seed::new(&mnemonic, "");

    let base_key = ExtendedPrivKey::new_master(Network::Bitcoin, seed.as_bytes())
        .map_err(|err| Error::bip32_key_generation_failed("Secp256k1".to_string(), err.into()))?;

    let private_key = base_key
        .derive_priv(
            &Secp256k1::new(),
            &standard_path_to_derivation_path(hd_path),
        )
        .map_err(|err| Error::bip32_key_generation_failed("Secp256k1".to_string(), err.into()))?;

    Ok(private_key)
}

fn standard_path_to_derivation_path(path: &StandardHDPath) -> DerivationPath {
    let child_numbers = vec![
        ChildNumber::from_hardened_idx(path.purpose().as_value().as_number())
            .expect("Purpose is not Hardened"),
        ChildNumber::from_hardened_idx(path.coin_type()).expect("Coin Type is not Hardened"),
        ChildNumber::from_hardened_idx(path.account()).expect("Account is not Hardened"),
        ChildNumber::from_normal_idx(path.change()).expect("Change is Hardened"),
        ChildNumber::from_normal_idx(path.index()).expect("Index is Hardened"),
    ];

    DerivationPath::from(child_numbers)
}

pub fn decode_bech32_address(address: &str) -> Result<Vec<u8>, Error> {
    bech32::decode(address).map_err(|e| Error::address_bech32_decode(address.to_string(), e))
}

pub fn encode_bech32_address(address_prefix: &str, address_bytes: &[u8]) -> Result<String, Error> {
    bech32::encode(address_prefix, address_bytes).map_err(Error::address_bech32_encode)
}

/// The account address bytes for a compressed secp256k1 public key:
/// `ripemd160(sha256(pubkey))`.
pub fn account_address_bytes(public_key: &PublicKey) -> Vec<u8> {
    hash160::Hash::hash(&public_key.serialize())
        .to_byte_array()
        .to_vec()
}

#[derive(Debug, Clone, Copy)]
pub struct Secp256k1KeyPair {
    pub public_key: PublicKey,
    private_key: SecretKey,
}

impl Secp256k1KeyPair {
    pub fn from_mnemonic(mnemonic: &str, hd_path: &StandardHDPath) -> Result<Self, Error> {
        let private_key = private_key_from_mnemonic(mnemonic, hd_path)?;
        let public_key = ExtendedPubKey::from_priv(&Secp256k1::signing_only(), &private_key);

        Ok(Self {
            public_key: public_key.public_key,
            private_key: private_key.private_key,
        })
    }

    /// Proto-encoded compressed public key, the `value` of a
    /// `/cosmos.crypto.secp256k1.PubKey` Any.
    pub fn public_key_bytes(&self) -> Result<Vec<u8>, Error> {
        utils::encode::protobuf::encode_to_bytes(&self.public_key.serialize().to_vec())
            .map_err(|e| Error::utils_protobuf_encode("secp256k1 public key".to_string(), e))
    }

    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, Error> {
        let message_hash = <sha2::Sha256 as sha2::Digest>::digest(message);
        let message = Message::from_slice(&message_hash)
            .map_err(|err| Error::bip32_key_generation_failed("Secp256k1".to_string(), err.into()))?;

        let signature = Secp256k1::signing_only()
            .sign_ecdsa(&message, &self.private_key)
            .serialize_compact()
            .to_vec();

        Ok(signature)
    }

    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let message_hash = <sha2::Sha256 as sha2::Digest>::digest(message);
        let message = match Message::from_slice(&message_hash) {
            Ok(message) => message,
            Err(_) => return false,
        };
        let signature = match Signature::from_compact(signature) {
            Ok(signature) => signature,
            Err(_) => return false,
        };

        Secp256k1::verification_only()
            .verify_ecdsa(&message, &signature, &self.public_key)
            .is_ok()
    }
}

#[cfg(test)]
pub mod keyring_tests {
    use std::str::FromStr;

    use hdpath::StandardHDPath;

    use super::{
        account_address_bytes, encode_bech32_address, EncodedPubKey, Secp256k1KeyPair,
    };

    // A throwaway testing mnemonic, safe to embed.
    pub const TEST_MNEMONIC: &str = "indicate match mom mango case sting pipe diagram ski garbage scrap regular kick dilemma melt raw test eager bitter float hunt pledge cross hair";

    fn test_hd_path() -> StandardHDPath {
        StandardHDPath::from_str("m/44'/118'/0'/0/0").expect("hd path error!")
    }

    #[test]
    pub fn pubkey_from_str_works() {
        let s = "{\"@type\":\"/cosmos.crypto.secp256k1.PubKey\",\"key\":\"AnWi6I8CrOIAS9ee4gsjvBxXwrkEYwUykjoiTrsU5ypg\"}";
        let pk = EncodedPubKey::from_str(s).expect("pubkey parse error!");

        assert_eq!(pk.r#type, "/cosmos.crypto.secp256k1.PubKey");
        assert_eq!(pk.key.len(), 33);
    }

    #[test]
    pub fn key_pair_is_deterministic() {
        let pair_1 = Secp256k1KeyPair::from_mnemonic(TEST_MNEMONIC, &test_hd_path())
            .expect("key pair error!");
        let pair_2 = Secp256k1KeyPair::from_mnemonic(TEST_MNEMONIC, &test_hd_path())
            .expect("key pair error!");

        assert_eq!(pair_1.public_key, pair_2.public_key);
    }

    #[test]
    pub fn sign_and_verify_works() {
        let key_pair = Secp256k1KeyPair::from_mnemonic(TEST_MNEMONIC, &test_hd_path())
            .expect("key pair error!");

        let message = b"packet relay test message";
        let signature = key_pair.sign(message).expect("sign error!");

        assert_eq!(signature.len(), 64);
        assert!(key_pair.verify(message, &signature));
        assert!(!key_pair.verify(b"another message", &signature));
    }

    #[test]
    pub fn address_derivation_works() {
        let key_pair = Secp256k1KeyPair::from_mnemonic(TEST_MNEMONIC, &test_hd_path())
            .expect("key pair error!");

        let address_bytes = account_address_bytes(&key_pair.public_key);
        assert_eq!(address_bytes.len(), 20);

        let address =
            encode_bech32_address("cosmos", &address_bytes).expect("bech32 encode error!");
        assert!(address.starts_with("cosmos1"));
    }
}
