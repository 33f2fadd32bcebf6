use std::fmt::{Display, Error as FmtError, Formatter};
use std::str::FromStr;

use ibc_proto::ibc::core::channel::v1::Packet as RawPacket;
use serde::{Deserialize, Serialize};

use super::timeout::TimeoutHeight;
use crate::error::TypesError;
use crate::ibc_core::ics24_host::identifier::{ChannelId, PortId};
use crate::timestamp::Timestamp;

#[derive(
    Copy, Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Sequence(u64);

impl Sequence {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Sequence {
    fn from(seq: u64) -> Self {
        Self(seq)
    }
}

impl From<Sequence> for u64 {
    fn from(seq: Sequence) -> Self {
        seq.0
    }
}

impl FromStr for Sequence {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|e| TypesError::parse_int_attribute("packet_sequence".to_string(), e))
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Packet {
    pub sequence: Sequence,
    pub source_port: PortId,
    pub source_channel: ChannelId,
    pub destination_port: PortId,
    pub destination_channel: ChannelId,
    pub data: Vec<u8>,
    pub timeout_height: TimeoutHeight,
    pub timeout_timestamp: Timestamp,
}

impl TryFrom<RawPacket> for Packet {
    type Error = TypesError;

    fn try_from(raw: RawPacket) -> Result<Self, Self::Error> {
        Ok(Packet {
            sequence: raw.sequence.into(),
            source_port: raw.source_port.parse().map_err(TypesError::ics24_host)?,
            source_channel: raw
                .source_channel
                .parse()
                .map_err(TypesError::ics24_host)?,
            destination_port: raw
                .destination_port
                .parse()
                .map_err(TypesError::ics24_host)?,
            destination_channel: raw
                .destination_channel
                .parse()
                .map_err(TypesError::ics24_host)?,
            data: raw.data,
            timeout_height: raw.timeout_height.try_into()?,
            timeout_timestamp: Timestamp::from_nanoseconds(raw.timeout_timestamp),
        })
    }
}

impl From<Packet> for RawPacket {
    fn from(packet: Packet) -> Self {
        RawPacket {
            sequence: packet.sequence.into(),
            source_port: packet.source_port.to_string(),
            source_channel: packet.source_channel.to_string(),
            destination_port: packet.destination_port.to_string(),
            destination_channel: packet.destination_channel.to_string(),
            data: packet.data,
            timeout_height: packet.timeout_height.into(),
            timeout_timestamp: packet.timeout_timestamp.nanoseconds(),
        }
    }
}

/// Packet data is omitted on purpose.
impl Display for Packet {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "seq:{}, path:{}/{}->{}/{}, toh:{}, tos:{}",
            self.sequence,
            self.source_channel,
            self.source_port,
            self.destination_channel,
            self.destination_port,
            self.timeout_height,
            self.timeout_timestamp
        )
    }
}

#[cfg(test)]
pub mod packet_tests {
    use std::str::FromStr;

    use ibc_proto::ibc::core::channel::v1::Packet as RawPacket;

    use super::{Packet, Sequence};
    use crate::ibc_core::ics02_client::height::Height;
    use crate::ibc_core::ics04_channel::timeout::TimeoutHeight;
    use crate::ibc_core::ics24_host::identifier::{ChannelId, PortId};
    use crate::timestamp::Timestamp;

    pub fn sample_packet(sequence: u64) -> Packet {
        Packet {
            sequence: sequence.into(),
            source_port: PortId::transfer(),
            source_channel: ChannelId::new(1),
            destination_port: PortId::transfer(),
            destination_channel: ChannelId::new(2),
            data: b"sample".to_vec(),
            timeout_height: TimeoutHeight::At(Height::new(2, 3456).unwrap()),
            timeout_timestamp: Timestamp::from_nanoseconds(123456789),
        }
    }

    #[test]
    pub fn sequence_from_str_works() {
        assert_eq!(Sequence::from_str("12").unwrap(), Sequence::from(12));
        assert!(Sequence::from_str("twelve").is_err());
    }

    #[test]
    pub fn packet_raw_roundtrip_works() {
        let packet = sample_packet(1);
        let raw = RawPacket::from(packet.clone());
        let back = Packet::try_from(raw).expect("packet from raw error!");

        assert_eq!(packet, back);
    }

    #[test]
    pub fn zero_timeout_height_is_never() {
        let mut raw = RawPacket::from(sample_packet(1));
        raw.timeout_height = None;

        let packet = Packet::try_from(raw).expect("packet from raw error!");
        assert_eq!(packet.timeout_height, TimeoutHeight::Never);
    }
}
