//! WebSocket Message Types
//!
//! Defines all message types exchanged between the dashboard page and the
//! server.

use serde::{Deserialize, Serialize};

use crate::binder::{ChartId, ChartUpdate, ControlChange};
use crate::chart::Figure;
use crate::dataset::PayloadRange;
use crate::selection::{Selection, SiteSelector};

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Site dropdown changed
    SetSite {
        /// `"ALL"` or a site identifier
        site: SiteSelector,
    },
    /// Payload slider changed
    SetPayloadRange {
        low: f64,
        high: f64,
    },
    /// Ping for keepalive
    Ping,
}

impl ClientMessage {
    /// The control change carried by this message, if any
    pub fn into_change(self) -> Option<ControlChange> {
        match self {
            ClientMessage::SetSite { site } => Some(ControlChange::Site(site)),
            ClientMessage::SetPayloadRange { low, high } => {
                Some(ControlChange::PayloadRange(PayloadRange::new(low, high)))
            }
            ClientMessage::Ping => None,
        }
    }
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Session established
    Connected {
        /// Unique session identifier
        session_id: String,
        /// Starting selection
        selection: Selection,
    },
    /// A recomputed chart
    Figure {
        /// Target chart region
        chart: ChartId,
        figure: Figure,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

impl From<ChartUpdate> for ServerMessage {
    fn from(update: ChartUpdate) -> Self {
        ServerMessage::Figure {
            chart: update.chart,
            figure: update.figure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::OutcomeSummary;
    use crate::chart::render_outcome_chart;

    #[test]
    fn test_client_message_deserialize_set_site() {
        let json = r#"{"type": "set_site", "site": "CCAFS LC-40"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg.into_change() {
            Some(ControlChange::Site(site)) => assert_eq!(site, SiteSelector::site("CCAFS LC-40")),
            other => panic!("Expected site change, got {:?}", other),
        }
    }

    #[test]
    fn test_client_message_deserialize_all_sites() {
        let json = r#"{"type": "set_site", "site": "ALL"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::SetSite { site: SiteSelector::All }));
    }

    #[test]
    fn test_client_message_deserialize_payload_range() {
        let json = r#"{"type": "set_payload_range", "low": 1000, "high": 5000.5}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg.into_change(),
            Some(ControlChange::PayloadRange(PayloadRange::new(1000.0, 5000.5)))
        );
    }

    #[test]
    fn test_client_message_deserialize_ping() {
        let json = r#"{"type": "ping"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
        assert!(msg.into_change().is_none());
    }

    #[test]
    fn test_client_message_rejects_unknown_type() {
        let json = r#"{"type": "subscribe", "topics": []}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }

    #[test]
    fn test_server_message_serialize_figure() {
        let update = ChartUpdate {
            chart: ChartId::SuccessPieChart,
            figure: render_outcome_chart(&OutcomeSummary::default(), &SiteSelector::All),
        };
        let json = serde_json::to_value(ServerMessage::from(update)).unwrap();

        assert_eq!(json["type"], "figure");
        assert_eq!(json["chart"], "success-pie-chart");
        assert_eq!(json["figure"]["data"][0]["type"], "pie");
    }

    #[test]
    fn test_server_message_serialize_connected() {
        let msg = ServerMessage::Connected {
            session_id: "abc-123".to_string(),
            selection: Selection {
                site: SiteSelector::All,
                payload_range: PayloadRange::new(0.0, 9600.0),
            },
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"connected\""));
        assert!(json.contains("\"session_id\":\"abc-123\""));
        assert!(json.contains("\"site\":\"ALL\""));
    }
}
