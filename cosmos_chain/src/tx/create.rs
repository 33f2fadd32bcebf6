use ibc_proto::cosmos::auth::v1beta1::BaseAccount;
use ibc_proto::cosmos::tx::v1beta1::mode_info::{Single, Sum};
use ibc_proto::cosmos::tx::v1beta1::{
    AuthInfo, Fee, ModeInfo, SignDoc, SignerInfo, Tx, TxBody, TxRaw,
};
use ibc_proto::google::protobuf::Any;
use utils::encode::protobuf;

use crate::account::Secp256k1Account;
use crate::config::CosmosChainConfig;
use crate::error::Error;
use crate::tx::types::{GasConfig, Memo};

pub fn create_and_sign_tx(
    chain_config: &CosmosChainConfig,
    account_info: &Secp256k1Account,
    account_detail: &BaseAccount,
    tx_memo: &Memo,
    messages: &[Any],
    fee: Option<Fee>,
) -> Result<(Tx, TxRaw), Error> {
    let public_key_bytes = account_info.key_pair().public_key_bytes()?;

    let signer_info = cosmos_signer_info(account_detail.sequence, public_key_bytes);

    let tx_body = tx_body(messages, tx_memo);
    let tx_body_bytes = tx_body_bytes(&tx_body)?;

    let fee = match fee {
        Some(fee) => fee,
        None => GasConfig::from(chain_config)
            .max_fee()
            .map_err(Error::operation)?,
    };

    let auth_info = auth_info(signer_info, fee);
    let auth_info_bytes = auth_info_bytes(&auth_info)?;

    let sign_doc = SignDoc {
        body_bytes: tx_body_bytes.clone(),
        auth_info_bytes: auth_info_bytes.clone(),
        chain_id: chain_config.chain_id.clone(),
        account_number: account_detail.account_number,
    };

    let encoded_sign_doc = protobuf::encode_to_bytes(&sign_doc)
        .map_err(|e| Error::utils_protobuf_encode("sign doc".to_string(), e))?;
    let signature = account_info.message_sign(&encoded_sign_doc)?;

    let tx = Tx {
        body: Some(tx_body),
        auth_info: Some(auth_info),
        signatures: vec![signature.clone()],
    };

    let tx_raw = TxRaw {
        body_bytes: tx_body_bytes,
        auth_info_bytes,
        signatures: vec![signature],
    };

    Ok((tx, tx_raw))
}

pub fn tx_body(proto_msgs: &[Any], memo: &Memo) -> TxBody {
    TxBody {
        messages: proto_msgs.to_vec(),
        memo: memo.to_string(),
        timeout_height: 0_u64,
        extension_options: Vec::<Any>::new(),
        non_critical_extension_options: Vec::<Any>::new(),
    }
}

pub fn tx_body_bytes(tx_body: &TxBody) -> Result<Vec<u8>, Error> {
    protobuf::encode_to_bytes(tx_body)
        .map_err(|e| Error::utils_protobuf_encode("tx body".to_string(), e))
}

pub fn cosmos_signer_info(account_sequence: u64, key_bytes: Vec<u8>) -> SignerInfo {
    let public_key = Any {
        type_url: "/cosmos.crypto.secp256k1.PubKey".to_string(),
        value: key_bytes,
    };

    // SIGN_MODE_DIRECT
    let single = Single { mode: 1 };
    let sum_single = Some(Sum::Single(single));
    let mode = Some(ModeInfo { sum: sum_single });

    SignerInfo {
        public_key: Some(public_key),
        mode_info: mode,
        sequence: account_sequence,
    }
}

pub fn auth_info(signer_info: SignerInfo, fee: Fee) -> AuthInfo {
    AuthInfo {
        signer_infos: vec![signer_info],
        fee: Some(fee),
        tip: None,
    }
}

pub fn auth_info_bytes(auth_info: &AuthInfo) -> Result<Vec<u8>, Error> {
    protobuf::encode_to_bytes(auth_info)
        .map_err(|e| Error::utils_protobuf_encode("auth info".to_string(), e))
}

#[cfg(test)]
pub mod tx_create_tests {
    use ibc_proto::cosmos::auth::v1beta1::BaseAccount;
    use ibc_proto::google::protobuf::Any;

    use super::create_and_sign_tx;
    use crate::account::Secp256k1Account;
    use crate::config::{CosmosChainConfig, GasPrice};
    use crate::keyring::keyring_tests::TEST_MNEMONIC;
    use crate::tx::types::Memo;

    pub fn test_config() -> CosmosChainConfig {
        let raw = r#"
            chain_id = "ibc-0"
            tendermint_rpc_addr = "http://127.0.0.1:26657"
            grpc_addr = "http://127.0.0.1:9090"
            account_prefix = "cosmos"

            [gas_price]
            price = 0.025
            denom = "stake"
        "#;

        toml::from_str(raw).expect("config parse error!")
    }

    pub fn test_account() -> Secp256k1Account {
        Secp256k1Account::from_mnemonic(TEST_MNEMONIC, "m/44'/118'/0'/0/0", "cosmos")
            .expect("account error!")
    }

    pub fn test_account_detail(account: &Secp256k1Account) -> BaseAccount {
        BaseAccount {
            address: account.address(),
            pub_key: None,
            account_number: 9,
            sequence: 4,
        }
    }

    #[test]
    pub fn create_and_sign_tx_works() {
        let config = test_config();
        let account = test_account();
        let account_detail = test_account_detail(&account);

        let messages = vec![Any {
            type_url: "/ibc.core.client.v1.MsgUpdateClient".to_string(),
            value: vec![1, 2, 3],
        }];

        let (tx, tx_raw) = create_and_sign_tx(
            &config,
            &account,
            &account_detail,
            &Memo::default(),
            &messages,
            None,
        )
        .expect("create and sign error!");

        assert_eq!(tx.signatures.len(), 1);
        assert_eq!(tx.signatures[0].len(), 64);
        assert_eq!(tx_raw.signatures, tx.signatures);
        assert!(!tx_raw.body_bytes.is_empty());

        let signer_infos = tx.auth_info.unwrap().signer_infos;
        assert_eq!(signer_infos.len(), 1);
        assert_eq!(signer_infos[0].sequence, 4);
    }
}
