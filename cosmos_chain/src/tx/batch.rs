use ibc_proto::cosmos::auth::v1beta1::BaseAccount;
use ibc_proto::cosmos::tx::v1beta1::Fee;
use ibc_proto::google::protobuf::Any;
use prost::Message;

use crate::account::Secp256k1Account;
use crate::config::CosmosChainConfig;
use crate::error::Error;
use crate::tx::create::create_and_sign_tx;
use crate::tx::error::TxError;
use crate::tx::types::{GasConfig, Memo};

/// Length information for an encoded transaction.
pub struct EncodedTxMetrics {
    /// Length of the encoded message, excluding the `body_bytes` field.
    pub envelope_len: usize,
    /// Length of the byte array in the `body_bytes` field of the `TxRaw` message.
    pub body_bytes_len: usize,
}

pub fn encoded_tx_metrics(
    chain_config: &CosmosChainConfig,
    account_info: &Secp256k1Account,
    account_detail: &BaseAccount,
    tx_memo: &Memo,
    messages: &[Any],
    fee: &Fee,
) -> Result<EncodedTxMetrics, Error> {
    let (_, tx_raw) = create_and_sign_tx(
        chain_config,
        account_info,
        account_detail,
        tx_memo,
        messages,
        Some(fee.clone()),
    )?;

    let total_len = tx_raw.encoded_len();
    let body_bytes_len = tx_raw.body_bytes.len();
    let envelope_len = if body_bytes_len == 0 {
        total_len
    } else {
        // Prost encodes `body_bytes` as a tag, a varint length and the bytes.
        total_len - 1 - prost::length_delimiter_len(body_bytes_len) - body_bytes_len
    };

    Ok(EncodedTxMetrics {
        envelope_len,
        body_bytes_len,
    })
}

/// Split `messages` into batches that respect both the chain's message-count
/// and tx-size limits, assuming the worst-case (max gas) fee envelope.
pub fn batch_messages(
    chain_config: &CosmosChainConfig,
    account_info: &Secp256k1Account,
    account_detail: &BaseAccount,
    tx_memo: &Memo,
    messages: Vec<Any>,
) -> Result<Vec<Vec<Any>>, Error> {
    let max_message_count = chain_config.max_msg_num.max(1);
    let max_tx_size = chain_config.max_tx_size;

    let max_fee = GasConfig::from(chain_config)
        .max_fee()
        .map_err(Error::operation)?;
    let tx_metrics = encoded_tx_metrics(
        chain_config,
        account_info,
        account_detail,
        tx_memo,
        &[],
        &max_fee,
    )?;

    let tx_envelope_len = tx_metrics.envelope_len;
    let empty_body_len = tx_metrics.body_bytes_len;

    let mut batches = vec![];
    let mut current_count = 0;
    let mut current_size = tx_envelope_len + empty_body_len;
    let mut current_batch = vec![];

    for message in messages {
        let message_len = message.encoded_len();
        // The message is encoded in the body as a tag plus a length prefix.
        let message_added_len = 1 + prost::length_delimiter_len(message_len) + message_len;

        if tx_envelope_len + empty_body_len + message_added_len > max_tx_size {
            return Err(Error::tx(TxError::message_exceeds_max_tx_size(
                message_added_len,
                max_tx_size,
            )));
        }

        if current_count >= max_message_count || current_size + message_added_len > max_tx_size {
            let insert_batch = std::mem::take(&mut current_batch);
            batches.push(insert_batch);
            current_count = 0;
            current_size = tx_envelope_len + empty_body_len;
        }

        current_count += 1;
        current_size += message_added_len;
        current_batch.push(message);
    }

    if !current_batch.is_empty() {
        batches.push(current_batch);
    }

    Ok(batches)
}

#[cfg(test)]
pub mod tx_batch_tests {
    use ibc_proto::google::protobuf::Any;

    use super::batch_messages;
    use crate::tx::create::tx_create_tests::{test_account, test_account_detail, test_config};
    use crate::tx::types::Memo;

    fn message(size: usize) -> Any {
        Any {
            type_url: "/ibc.core.channel.v1.MsgRecvPacket".to_string(),
            value: vec![0; size],
        }
    }

    #[test]
    pub fn batch_by_message_count_works() {
        let mut config = test_config();
        config.max_msg_num = 2;
        let account = test_account();
        let account_detail = test_account_detail(&account);

        let messages = vec![message(10), message(10), message(10)];
        let batches = batch_messages(&config, &account, &account_detail, &Memo::default(), messages)
            .expect("batch error!");

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].len(), 2);
        assert_eq!(batches[1].len(), 1);
    }

    #[test]
    pub fn batch_by_tx_size_works() {
        let mut config = test_config();
        config.max_tx_size = 1_000;
        let account = test_account();
        let account_detail = test_account_detail(&account);

        let messages = vec![message(400), message(400), message(400)];
        let batches = batch_messages(&config, &account, &account_detail, &Memo::default(), messages)
            .expect("batch error!");

        assert!(batches.len() >= 2);
        let total: usize = batches.iter().map(|b| b.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    pub fn oversized_message_fails() {
        let mut config = test_config();
        config.max_tx_size = 300;
        let account = test_account();
        let account_detail = test_account_detail(&account);

        let messages = vec![message(400)];
        let result =
            batch_messages(&config, &account, &account_detail, &Memo::default(), messages);

        assert!(result.is_err());
    }

    #[test]
    pub fn empty_messages_produce_no_batches(){
        let config = test_config();
        let account = test_account();
        let account_detail = test_account_detail(&account);

        let batches =
            batch_messages(&config, &account, &account_detail, &Memo::default(), vec![])
                .expect("batch error!");

        assert!(batches.is_empty());
    }
}
