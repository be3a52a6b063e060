/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Outbound request construction.
//!
//! [`RequestBuilder`] produces fully populated messages for the three requests
//! the client issues. Every build consumes one header sequence number and one
//! request identifier from the caller's [`IdGenerator`], in that order.
//! Building never validates field values.

use crate::ids::IdGenerator;
use fixpoll_core::field::tags;
use fixpoll_core::message::{Message, MsgType};
use fixpoll_core::types::{OpenClose, OrdType, Side, Timestamp};
use fixpoll_engine::SessionId;
use rust_decimal::Decimal;
use std::fmt;

/// MsgType of the venue's order status request.
pub const ORDER_STATUS_MSG_TYPE: &str = "UAF";
/// MsgType of the venue's account data request.
pub const ACCOUNT_DATA_MSG_TYPE: &str = "UAR";

/// The requests the client knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// A single limit order (MsgType D).
    NewOrderSingle,
    /// Venue-specific order status query (MsgType UAF).
    OrderStatusQuery,
    /// Venue-specific account data query (MsgType UAR).
    AccountDataQuery,
}

impl RequestKind {
    /// Returns the MsgType this request is sent with.
    #[must_use]
    pub fn msg_type(self) -> MsgType {
        match self {
            Self::NewOrderSingle => MsgType::NewOrderSingle,
            Self::OrderStatusQuery => MsgType::Custom(ORDER_STATUS_MSG_TYPE.to_string()),
            Self::AccountDataQuery => MsgType::Custom(ACCOUNT_DATA_MSG_TYPE.to_string()),
        }
    }

    /// Returns the event text logged when this request is sent.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewOrderSingle => "New Order Single",
            Self::OrderStatusQuery => "Check Order Status",
            Self::AccountDataQuery => "Check Account Data",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed order parameters stamped on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDefaults {
    /// Account (tag 1), sent on all three requests.
    pub account: String,
    /// Symbol (tag 55).
    pub symbol: String,
    /// OrderQty (tag 38).
    pub quantity: u64,
    /// Price (tag 44).
    pub price: Decimal,
    /// Side (tag 54).
    pub side: Side,
    /// OrdType (tag 40).
    pub ord_type: OrdType,
    /// OpenClose (tag 77).
    pub open_close: OpenClose,
}

impl Default for OrderDefaults {
    fn default() -> Self {
        Self {
            account: "17018382".to_string(),
            symbol: "X.US.OREURUSD".to_string(),
            quantity: 100,
            price: Decimal::new(1216, 3),
            side: Side::Buy,
            ord_type: OrdType::Limit,
            open_close: OpenClose::Open,
        }
    }
}

/// A request ready to hand to the engine.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    /// Which request this is.
    pub kind: RequestKind,
    /// The populated message.
    pub message: Message,
}

/// Builds outbound requests.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    defaults: OrderDefaults,
}

impl RequestBuilder {
    /// Creates a builder stamping the given order parameters.
    #[must_use]
    pub fn new(defaults: OrderDefaults) -> Self {
        Self { defaults }
    }

    /// Returns the order parameters in use.
    #[must_use]
    pub fn defaults(&self) -> &OrderDefaults {
        &self.defaults
    }

    /// Builds one request addressed to `session`.
    ///
    /// The header gets BeginString, MsgType, SenderCompID, TargetCompID,
    /// MsgSeqNum (the next order id) and SendingTime, in that order.
    pub fn build(
        &self,
        kind: RequestKind,
        session: &SessionId,
        ids: &mut IdGenerator,
    ) -> OutboundRequest {
        let mut message = Message::new();
        let header = message.header_mut();
        header.set_str(tags::BEGIN_STRING, session.begin_string.as_str());
        header.set_str(tags::MSG_TYPE, kind.msg_type().as_str());
        header.set_str(tags::SENDER_COMP_ID, session.sender_comp_id.as_str());
        header.set_str(tags::TARGET_COMP_ID, session.target_comp_id.as_str());
        header.set_uint(tags::MSG_SEQ_NUM, ids.next_order_id());
        header.set_str(tags::SENDING_TIME, Timestamp::now().format_micros());

        let defaults = &self.defaults;
        let body = message.body_mut();
        body.set_str(tags::ACCOUNT, defaults.account.as_str());
        match kind {
            RequestKind::NewOrderSingle => {
                body.set_str(tags::CL_ORD_ID, ids.next_exec_id());
                body.set_uint(tags::ORDER_QTY, defaults.quantity);
                body.set_char(tags::ORD_TYPE, defaults.ord_type.as_char());
                body.set_decimal(tags::PRICE, defaults.price);
                body.set_str(tags::SYMBOL, defaults.symbol.as_str());
                body.set_char(tags::SIDE, defaults.side.as_char());
                body.set_str(
                    tags::TRANSACT_TIME,
                    Timestamp::now().format_micros(),
                );
                body.set_char(tags::OPEN_CLOSE, defaults.open_close.as_char());
            }
            RequestKind::OrderStatusQuery => {
                body.set_str(tags::ORDER_STATUS_REQUEST_ID, ids.next_exec_id());
            }
            RequestKind::AccountDataQuery => {
                body.set_str(tags::ACCOUNT_DATA_REQUEST_ID, ids.next_exec_id());
            }
        }

        OutboundRequest { kind, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixpoll_tagvalue::{calculate_checksum, render_packet};

    fn session() -> SessionId {
        SessionId::new("FIX.4.4", "CLIENT", "SERVER")
    }

    fn tag_order(fields: &fixpoll_core::FieldMap) -> Vec<u32> {
        fields.iter().map(|f| f.tag).collect()
    }

    #[test]
    fn test_new_order_single_fields() {
        let mut ids = IdGenerator::new();
        ids.next_exec_id();
        ids.next_exec_id();

        let request =
            RequestBuilder::default().build(RequestKind::NewOrderSingle, &session(), &mut ids);
        let msg = &request.message;

        assert_eq!(request.kind, RequestKind::NewOrderSingle);
        assert_eq!(msg.msg_type(), Some(MsgType::NewOrderSingle));
        assert_eq!(msg.get_field(tags::ACCOUNT), Some("17018382"));
        assert_eq!(msg.get_field(tags::CL_ORD_ID), Some("3"));
        assert_eq!(msg.get_field(tags::ORDER_QTY), Some("100"));
        assert_eq!(msg.get_field(tags::ORD_TYPE), Some("2"));
        assert_eq!(msg.get_field(tags::PRICE), Some("1.216"));
        assert_eq!(msg.get_field(tags::SYMBOL), Some("X.US.OREURUSD"));
        assert_eq!(msg.get_field(tags::SIDE), Some("1"));
        assert_eq!(msg.get_field(tags::OPEN_CLOSE), Some("O"));
        assert!(msg.get_field(tags::TRANSACT_TIME).is_some());
    }

    #[test]
    fn test_header_layout() {
        let mut ids = IdGenerator::new();
        let request =
            RequestBuilder::default().build(RequestKind::OrderStatusQuery, &session(), &mut ids);
        let header = request.message.header();

        assert_eq!(tag_order(header), vec![8, 35, 49, 56, 34, 52]);
        assert_eq!(header.get(tags::BEGIN_STRING), Some("FIX.4.4"));
        assert_eq!(header.get(tags::SENDER_COMP_ID), Some("CLIENT"));
        assert_eq!(header.get(tags::TARGET_COMP_ID), Some("SERVER"));
        assert_eq!(header.get(tags::MSG_SEQ_NUM), Some("1"));

        // YYYYMMDD-HH:MM:SS.ffffff
        let sending_time = header.get(tags::SENDING_TIME).unwrap();
        assert_eq!(sending_time.len(), 24);
        assert_eq!(&sending_time[8..9], "-");
        assert_eq!(&sending_time[17..18], ".");
    }

    #[test]
    fn test_status_and_account_queries() {
        let mut ids = IdGenerator::new();
        let builder = RequestBuilder::default();

        let status = builder.build(RequestKind::OrderStatusQuery, &session(), &mut ids);
        assert_eq!(status.message.get_field(tags::MSG_TYPE), Some("UAF"));
        assert_eq!(tag_order(status.message.body()), vec![1, 50584]);
        assert_eq!(status.message.get_field(50584), Some("1"));

        let account = builder.build(RequestKind::AccountDataQuery, &session(), &mut ids);
        assert_eq!(account.message.get_field(tags::MSG_TYPE), Some("UAR"));
        assert_eq!(tag_order(account.message.body()), vec![1, 20003]);
        assert_eq!(account.message.get_field(20003), Some("2"));
        assert_eq!(account.message.get_field(tags::MSG_SEQ_NUM), Some("2"));
    }

    #[test]
    fn test_each_build_advances_both_counters_once() {
        let mut ids = IdGenerator::new();
        let builder = RequestBuilder::default();
        for kind in [
            RequestKind::NewOrderSingle,
            RequestKind::OrderStatusQuery,
            RequestKind::AccountDataQuery,
        ] {
            builder.build(kind, &session(), &mut ids);
        }
        assert_eq!(ids.order_seq(), 3);
        assert_eq!(ids.exec_seq(), 3);
    }

    #[test]
    fn test_overridden_defaults() {
        let defaults = OrderDefaults {
            account: "ACC-9".to_string(),
            symbol: "EURUSD".to_string(),
            quantity: 5,
            ..OrderDefaults::default()
        };
        let mut ids = IdGenerator::new();
        let request =
            RequestBuilder::new(defaults).build(RequestKind::NewOrderSingle, &session(), &mut ids);
        assert_eq!(request.message.get_field(tags::ACCOUNT), Some("ACC-9"));
        assert_eq!(request.message.get_field(tags::SYMBOL), Some("EURUSD"));
        assert_eq!(request.message.get_field(tags::ORDER_QTY), Some("5"));
    }

    #[test]
    fn test_rendered_request_has_valid_trailer() {
        let mut ids = IdGenerator::new();
        let request =
            RequestBuilder::default().build(RequestKind::AccountDataQuery, &session(), &mut ids);
        let packet = render_packet(&request.message).unwrap();

        assert!(packet.starts_with("8=FIX.4.4|9="));
        assert!(packet.contains("|35=UAR|"));

        let trailer_at = packet.rfind("10=").unwrap();
        let wire = packet[..trailer_at].replace('|', "\x01");
        let expected = format!("10={:03}|", calculate_checksum(wire.as_bytes()));
        assert_eq!(&packet[trailer_at..], expected);
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(RequestKind::NewOrderSingle.to_string(), "New Order Single");
        assert_eq!(RequestKind::AccountDataQuery.msg_type().as_str(), "UAR");
    }
}
