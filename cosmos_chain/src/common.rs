use ibc_proto::cosmos::base::query::v1beta1::PageRequest as RawPageRequest;
use ibc_proto::google::protobuf::Duration as ProtobufDuration;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tendermint::block::Height as TmBlockHeight;
use types::ibc_core::ics02_client::height::Height;

pub fn parse_protobuf_duration(duration: ProtobufDuration) -> Duration {
    Duration::new(duration.seconds as u64, duration.nanos as u32)
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub enum QueryHeight {
    Latest,
    Specific(Height),
}

impl From<QueryHeight> for TmBlockHeight {
    fn from(height_query: QueryHeight) -> Self {
        match height_query {
            QueryHeight::Latest => Self::from(0_u32),
            QueryHeight::Specific(height) => Self::from(height),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PageRequest {
    pub key: Vec<u8>,
    pub offset: u64,
    pub limit: u64,
    pub count_total: bool,
    pub reverse: bool,
}

impl PageRequest {
    pub fn all() -> Self {
        // Note: do not use u64::MAX as the limit, some nodes reject it.
        PageRequest {
            limit: u32::MAX as u64,
            ..Default::default()
        }
    }
}

impl From<PageRequest> for RawPageRequest {
    fn from(request: PageRequest) -> Self {
        RawPageRequest {
            key: request.key,
            offset: request.offset,
            limit: request.limit,
            count_total: request.count_total,
            reverse: request.reverse,
        }
    }
}

#[cfg(test)]
pub mod common_tests {
    use tendermint::block::Height as TmBlockHeight;
    use types::ibc_core::ics02_client::height::Height;

    use super::QueryHeight;

    #[test]
    pub fn query_height_conversion_works() {
        let latest: TmBlockHeight = QueryHeight::Latest.into();
        assert_eq!(latest.value(), 0);

        let specific: TmBlockHeight =
            QueryHeight::Specific(Height::new(1, 42).unwrap()).into();
        assert_eq!(specific.value(), 42);
    }
}
