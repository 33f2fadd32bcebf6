use ibc_proto::google::protobuf::Any;
use prost::Message;
use utils::encode::protobuf::encode_to_bytes;

pub trait Msg: Clone {
    type Raw: From<Self> + Message + core::fmt::Debug;

    /// Unique type identifier for this message, to support encoding to/from `Any`.
    fn type_url(&self) -> String;

    #[allow(clippy::wrong_self_convention)]
    fn to_any(self) -> Any {
        Any {
            type_url: self.type_url(),
            value: self.get_sign_bytes(),
        }
    }

    fn get_sign_bytes(self) -> Vec<u8> {
        let raw: Self::Raw = self.into();
        match encode_to_bytes(&raw) {
            Ok(bytes) => bytes,
            // A domain message that cannot be proto-encoded is a programming
            // error, not a runtime condition.
            Err(e) => panic!("proto encoding of {raw:?} failed: {e}"),
        }
    }
}
