use bech32::{FromBase32, ToBase32};

use super::error::EncodeError;

pub fn encode(hrp: &str, data: &[u8]) -> Result<String, EncodeError> {
    bech32::encode(hrp, data.to_base32(), bech32::Variant::Bech32)
        .map_err(|e| EncodeError::bech32_encode(e))
}

pub fn decode(data: &str) -> Result<Vec<u8>, EncodeError> {
    let (_, data, _) = bech32::decode(data).map_err(|e| EncodeError::bech32_decode(e))?;
    Vec::from_base32(&data).map_err(|e| EncodeError::bech32_decode(e))
}

#[cfg(test)]
pub mod bech32_tests {
    use super::{decode, encode};

    #[test]
    pub fn encode_decode_roundtrip_works() {
        let address_bytes: Vec<u8> = (0..20).collect();

        let encoded = encode("cosmos", &address_bytes).expect("bech32 encode error!");
        assert!(encoded.starts_with("cosmos1"));

        let decoded = decode(&encoded).expect("bech32 decode error!");
        assert_eq!(decoded, address_bytes);
    }

    #[test]
    pub fn decode_garbage_fails() {
        assert!(decode("not-a-bech32-address").is_err());
    }
}
