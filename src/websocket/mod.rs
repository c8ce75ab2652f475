//! WebSocket Dashboard Sessions
//!
//! Carries control changes from the page to the server and recomputed
//! charts back.
//!
//! ## Architecture
//!
//! - **SessionHub**: tracks live sessions and enforces the session limit
//! - **Handler**: handles WebSocket upgrade and runs one session per socket
//! - **Messages**: defines client and server message formats
//!
//! ## Protocol
//!
//! On connect the server sends `connected` followed by one `figure` per
//! chart. Every `set_site` or `set_payload_range` is answered with fresh
//! `figure` messages for the bound charts.
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8050/ws');
//! ws.onopen = () => ws.send(JSON.stringify({type: 'set_site', site: 'KSC LC-39A'}));
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'figure') Plotly.react(msg.chart, msg.figure.data, msg.figure.layout);
//! };
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{HubConfig, HubError, SessionHub, SessionId};
pub use messages::{ClientMessage, ServerMessage};
