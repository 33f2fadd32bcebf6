use std::fmt::{Display, Error as FmtError, Formatter};
use std::str::FromStr;

use subtle_encoding::hex;
use tendermint::abci::{Event as AbciEvent, EventAttribute};

use crate::error::TypesError;
use crate::ibc_core::ics02_client::height::Height;
use crate::ibc_core::ics04_channel::packet::Packet;
use crate::ibc_core::ics24_host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
use crate::timestamp::Timestamp;

/// Client event types
const CREATE_CLIENT_EVENT: &str = "create_client";
const UPDATE_CLIENT_EVENT: &str = "update_client";
/// Connection event types
const CONNECTION_INIT_EVENT: &str = "connection_open_init";
const CONNECTION_TRY_EVENT: &str = "connection_open_try";
const CONNECTION_ACK_EVENT: &str = "connection_open_ack";
const CONNECTION_CONFIRM_EVENT: &str = "connection_open_confirm";
/// Channel event types
const CHANNEL_OPEN_INIT_EVENT: &str = "channel_open_init";
const CHANNEL_OPEN_TRY_EVENT: &str = "channel_open_try";
const CHANNEL_OPEN_ACK_EVENT: &str = "channel_open_ack";
const CHANNEL_OPEN_CONFIRM_EVENT: &str = "channel_open_confirm";
/// Packet event types
const SEND_PACKET_EVENT: &str = "send_packet";
const WRITE_ACK_EVENT: &str = "write_acknowledgement";
const ACK_PACKET_EVENT: &str = "acknowledge_packet";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientAttributes {
    pub client_id: ClientId,
    pub consensus_height: Option<Height>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionAttributes {
    pub connection_id: Option<ConnectionId>,
    pub client_id: ClientId,
    pub counterparty_connection_id: Option<ConnectionId>,
    pub counterparty_client_id: ClientId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelAttributes {
    pub port_id: PortId,
    pub channel_id: Option<ChannelId>,
    pub connection_id: ConnectionId,
    pub counterparty_port_id: PortId,
    pub counterparty_channel_id: Option<ChannelId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendPacket {
    pub packet: Packet,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteAcknowledgement {
    pub packet: Packet,
    pub ack: Vec<u8>,
}

impl WriteAcknowledgement {
    pub fn dst_port_id(&self) -> &PortId {
        &self.packet.destination_port
    }

    pub fn dst_channel_id(&self) -> &ChannelId {
        &self.packet.destination_channel
    }

    pub fn sequence(&self) -> crate::ibc_core::ics04_channel::packet::Sequence {
        self.packet.sequence
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcknowledgePacket {
    pub packet: Packet,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IbcEvent {
    CreateClient(ClientAttributes),
    UpdateClient(ClientAttributes),
    OpenInitConnection(ConnectionAttributes),
    OpenTryConnection(ConnectionAttributes),
    OpenAckConnection(ConnectionAttributes),
    OpenConfirmConnection(ConnectionAttributes),
    OpenInitChannel(ChannelAttributes),
    OpenTryChannel(ChannelAttributes),
    OpenAckChannel(ChannelAttributes),
    OpenConfirmChannel(ChannelAttributes),
    SendPacket(SendPacket),
    WriteAcknowledgement(WriteAcknowledgement),
    AcknowledgePacket(AcknowledgePacket),
    /// The deliver_tx result reported an error instead of events.
    ChainError(String),
}

impl IbcEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::CreateClient(_) => CREATE_CLIENT_EVENT,
            Self::UpdateClient(_) => UPDATE_CLIENT_EVENT,
            Self::OpenInitConnection(_) => CONNECTION_INIT_EVENT,
            Self::OpenTryConnection(_) => CONNECTION_TRY_EVENT,
            Self::OpenAckConnection(_) => CONNECTION_ACK_EVENT,
            Self::OpenConfirmConnection(_) => CONNECTION_CONFIRM_EVENT,
            Self::OpenInitChannel(_) => CHANNEL_OPEN_INIT_EVENT,
            Self::OpenTryChannel(_) => CHANNEL_OPEN_TRY_EVENT,
            Self::OpenAckChannel(_) => CHANNEL_OPEN_ACK_EVENT,
            Self::OpenConfirmChannel(_) => CHANNEL_OPEN_CONFIRM_EVENT,
            Self::SendPacket(_) => SEND_PACKET_EVENT,
            Self::WriteAcknowledgement(_) => WRITE_ACK_EVENT,
            Self::AcknowledgePacket(_) => ACK_PACKET_EVENT,
            Self::ChainError(_) => "chain_error",
        }
    }
}

impl Display for IbcEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::SendPacket(ev) => write!(f, "{}({})", self.event_type(), ev.packet),
            Self::WriteAcknowledgement(ev) => write!(f, "{}({})", self.event_type(), ev.packet),
            Self::AcknowledgePacket(ev) => write!(f, "{}({})", self.event_type(), ev.packet),
            Self::ChainError(e) => write!(f, "chain_error({e})"),
            _ => write!(f, "{}", self.event_type()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IbcEventWithHeight {
    pub event: IbcEvent,
    pub height: Height,
}

impl IbcEventWithHeight {
    pub fn new(event: IbcEvent, height: Height) -> Self {
        Self { event, height }
    }
}

impl Display for IbcEventWithHeight {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{} at height {}", self.event, self.height)
    }
}

fn find_attribute<'a>(attributes: &'a [EventAttribute], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|attr| attr.key == key)
        .map(|attr| attr.value.as_str())
}

fn required_attribute<'a>(
    attributes: &'a [EventAttribute],
    key: &str,
) -> Result<&'a str, TypesError> {
    find_attribute(attributes, key)
        .ok_or_else(|| TypesError::missing_event_attribute(key.to_string()))
}

fn client_attributes(attributes: &[EventAttribute]) -> Result<ClientAttributes, TypesError> {
    let client_id = required_attribute(attributes, "client_id")?
        .parse()
        .map_err(TypesError::ics24_host)?;

    let consensus_height = find_attribute(attributes, "consensus_height")
        .and_then(|value| Height::from_str(value).ok());

    Ok(ClientAttributes {
        client_id,
        consensus_height,
    })
}

fn connection_attributes(
    attributes: &[EventAttribute],
) -> Result<ConnectionAttributes, TypesError> {
    let parse_opt_connection = |value: Option<&str>| -> Result<Option<ConnectionId>, TypesError> {
        match value {
            Some(v) if !v.is_empty() => {
                Ok(Some(v.parse().map_err(TypesError::ics24_host)?))
            }
            _ => Ok(None),
        }
    };

    Ok(ConnectionAttributes {
        connection_id: parse_opt_connection(find_attribute(attributes, "connection_id"))?,
        client_id: required_attribute(attributes, "client_id")?
            .parse()
            .map_err(TypesError::ics24_host)?,
        counterparty_connection_id: parse_opt_connection(find_attribute(
            attributes,
            "counterparty_connection_id",
        ))?,
        counterparty_client_id: required_attribute(attributes, "counterparty_client_id")?
            .parse()
            .map_err(TypesError::ics24_host)?,
    })
}

fn channel_attributes(attributes: &[EventAttribute]) -> Result<ChannelAttributes, TypesError> {
    let parse_opt_channel = |value: Option<&str>| -> Result<Option<ChannelId>, TypesError> {
        match value {
            Some(v) if !v.is_empty() => {
                Ok(Some(v.parse().map_err(TypesError::ics24_host)?))
            }
            _ => Ok(None),
        }
    };

    Ok(ChannelAttributes {
        port_id: required_attribute(attributes, "port_id")?
            .parse()
            .map_err(TypesError::ics24_host)?,
        channel_id: parse_opt_channel(find_attribute(attributes, "channel_id"))?,
        connection_id: required_attribute(attributes, "connection_id")?
            .parse()
            .map_err(TypesError::ics24_host)?,
        counterparty_port_id: required_attribute(attributes, "counterparty_port_id")?
            .parse()
            .map_err(TypesError::ics24_host)?,
        counterparty_channel_id: parse_opt_channel(find_attribute(
            attributes,
            "counterparty_channel_id",
        ))?,
    })
}

/// Prefer the hex attribute; older chains only emit the raw-string variant.
fn bytes_attribute(
    attributes: &[EventAttribute],
    hex_key: &str,
    raw_key: &str,
) -> Result<Vec<u8>, TypesError> {
    if let Some(value) = find_attribute(attributes, hex_key) {
        return hex::decode(value.as_bytes())
            .map_err(|e| TypesError::hex_decode(hex_key.to_string(), e));
    }

    Ok(find_attribute(attributes, raw_key)
        .map(|value| value.as_bytes().to_vec())
        .unwrap_or_default())
}

fn packet_from_attributes(attributes: &[EventAttribute]) -> Result<Packet, TypesError> {
    let sequence = required_attribute(attributes, "packet_sequence")?
        .parse::<u64>()
        .map_err(|e| TypesError::parse_int_attribute("packet_sequence".to_string(), e))?;

    let timeout_timestamp = required_attribute(attributes, "packet_timeout_timestamp")?
        .parse::<u64>()
        .map_err(|e| TypesError::parse_int_attribute("packet_timeout_timestamp".to_string(), e))?;

    Ok(Packet {
        sequence: sequence.into(),
        source_port: required_attribute(attributes, "packet_src_port")?
            .parse()
            .map_err(TypesError::ics24_host)?,
        source_channel: required_attribute(attributes, "packet_src_channel")?
            .parse()
            .map_err(TypesError::ics24_host)?,
        destination_port: required_attribute(attributes, "packet_dst_port")?
            .parse()
            .map_err(TypesError::ics24_host)?,
        destination_channel: required_attribute(attributes, "packet_dst_channel")?
            .parse()
            .map_err(TypesError::ics24_host)?,
        data: bytes_attribute(attributes, "packet_data_hex", "packet_data")?,
        timeout_height: required_attribute(attributes, "packet_timeout_height")?.parse()?,
        timeout_timestamp: Timestamp::from_nanoseconds(timeout_timestamp),
    })
}

pub fn ibc_event_try_from_abci_event(abci_event: &AbciEvent) -> Result<IbcEvent, TypesError> {
    let attributes = &abci_event.attributes;

    match abci_event.kind.as_str() {
        CREATE_CLIENT_EVENT => Ok(IbcEvent::CreateClient(client_attributes(attributes)?)),
        UPDATE_CLIENT_EVENT => Ok(IbcEvent::UpdateClient(client_attributes(attributes)?)),
        CONNECTION_INIT_EVENT => Ok(IbcEvent::OpenInitConnection(connection_attributes(
            attributes,
        )?)),
        CONNECTION_TRY_EVENT => Ok(IbcEvent::OpenTryConnection(connection_attributes(
            attributes,
        )?)),
        CONNECTION_ACK_EVENT => Ok(IbcEvent::OpenAckConnection(connection_attributes(
            attributes,
        )?)),
        CONNECTION_CONFIRM_EVENT => Ok(IbcEvent::OpenConfirmConnection(connection_attributes(
            attributes,
        )?)),
        CHANNEL_OPEN_INIT_EVENT => Ok(IbcEvent::OpenInitChannel(channel_attributes(attributes)?)),
        CHANNEL_OPEN_TRY_EVENT => Ok(IbcEvent::OpenTryChannel(channel_attributes(attributes)?)),
        CHANNEL_OPEN_ACK_EVENT => Ok(IbcEvent::OpenAckChannel(channel_attributes(attributes)?)),
        CHANNEL_OPEN_CONFIRM_EVENT => Ok(IbcEvent::OpenConfirmChannel(channel_attributes(
            attributes,
        )?)),
        SEND_PACKET_EVENT => Ok(IbcEvent::SendPacket(SendPacket {
            packet: packet_from_attributes(attributes)?,
        })),
        WRITE_ACK_EVENT => Ok(IbcEvent::WriteAcknowledgement(WriteAcknowledgement {
            packet: packet_from_attributes(attributes)?,
            ack: bytes_attribute(attributes, "packet_ack_hex", "packet_ack")?,
        })),
        ACK_PACKET_EVENT => Ok(IbcEvent::AcknowledgePacket(AcknowledgePacket {
            packet: packet_from_attributes(attributes)?,
        })),
        other => Err(TypesError::unknown_event(other.to_string())),
    }
}

pub fn extract_client_id(event: &IbcEvent) -> Result<&ClientId, TypesError> {
    match event {
        IbcEvent::CreateClient(attrs) | IbcEvent::UpdateClient(attrs) => Ok(&attrs.client_id),
        other => Err(TypesError::unknown_event(other.event_type().to_string())),
    }
}

pub fn extract_connection_id(event: &IbcEvent) -> Result<&ConnectionId, TypesError> {
    match event {
        IbcEvent::OpenInitConnection(attrs)
        | IbcEvent::OpenTryConnection(attrs)
        | IbcEvent::OpenAckConnection(attrs)
        | IbcEvent::OpenConfirmConnection(attrs) => attrs
            .connection_id
            .as_ref()
            .ok_or_else(|| TypesError::missing_event_attribute("connection_id".to_string())),
        other => Err(TypesError::unknown_event(other.event_type().to_string())),
    }
}

pub fn extract_channel_id(event: &IbcEvent) -> Result<&ChannelId, TypesError> {
    match event {
        IbcEvent::OpenInitChannel(attrs)
        | IbcEvent::OpenTryChannel(attrs)
        | IbcEvent::OpenAckChannel(attrs)
        | IbcEvent::OpenConfirmChannel(attrs) => attrs
            .channel_id
            .as_ref()
            .ok_or_else(|| TypesError::missing_event_attribute("channel_id".to_string())),
        other => Err(TypesError::unknown_event(other.event_type().to_string())),
    }
}

#[cfg(test)]
pub mod ibc_events_tests {
    use tendermint::abci::{Event as AbciEvent, EventAttribute};

    use super::{extract_channel_id, ibc_event_try_from_abci_event, IbcEvent};

    fn attr(key: &str, value: &str) -> EventAttribute {
        EventAttribute {
            key: key.to_string(),
            value: value.to_string(),
            index: false,
        }
    }

    fn send_packet_event() -> AbciEvent {
        AbciEvent {
            kind: "send_packet".to_string(),
            attributes: vec![
                attr("packet_sequence", "3"),
                attr("packet_src_port", "transfer"),
                attr("packet_src_channel", "channel-0"),
                attr("packet_dst_port", "transfer"),
                attr("packet_dst_channel", "channel-5"),
                attr("packet_timeout_height", "1-200"),
                attr("packet_timeout_timestamp", "0"),
                attr("packet_data_hex", "7b7d"),
                attr("packet_connection", "connection-0"),
            ],
        }
    }

    #[test]
    pub fn send_packet_parse_works() {
        let event = ibc_event_try_from_abci_event(&send_packet_event()).expect("parse error!");

        match event {
            IbcEvent::SendPacket(ev) => {
                assert_eq!(ev.packet.sequence, 3.into());
                assert_eq!(ev.packet.destination_channel.as_str(), "channel-5");
                assert_eq!(ev.packet.data, b"{}".to_vec());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    pub fn write_ack_parse_works() {
        let mut abci_event = send_packet_event();
        abci_event.kind = "write_acknowledgement".to_string();
        abci_event
            .attributes
            .push(attr("packet_ack", r#"{"result":"AQ=="}"#));

        let event = ibc_event_try_from_abci_event(&abci_event).expect("parse error!");

        match event {
            IbcEvent::WriteAcknowledgement(ev) => {
                assert_eq!(ev.ack, br#"{"result":"AQ=="}"#.to_vec());
                assert_eq!(ev.dst_channel_id().as_str(), "channel-5");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    pub fn channel_open_init_parse_works() {
        let abci_event = AbciEvent {
            kind: "channel_open_init".to_string(),
            attributes: vec![
                attr("port_id", "transfer"),
                attr("channel_id", "channel-0"),
                attr("connection_id", "connection-0"),
                attr("counterparty_port_id", "transfer"),
                attr("counterparty_channel_id", ""),
            ],
        };

        let event = ibc_event_try_from_abci_event(&abci_event).expect("parse error!");
        let channel_id = extract_channel_id(&event).expect("channel id error!");
        assert_eq!(channel_id.as_str(), "channel-0");
    }

    #[test]
    pub fn unknown_event_fails() {
        let abci_event = AbciEvent {
            kind: "coin_spent".to_string(),
            attributes: vec![],
        };

        assert!(ibc_event_try_from_abci_event(&abci_event).is_err());
    }
}
