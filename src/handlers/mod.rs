//! Listener dispatch.
//!
//! Plugins register `(pattern, handler, gate)` listeners into a
//! [`ListenerRegistry`]. The [`Router`] matches every inbound chat line
//! against all of them, applies mention and operator gating, and runs each
//! matching handler under crash isolation.
//!
//! ## Text selection
//!
//! Mention-gated listeners see the line with the leading `"<nick>: "` chopped
//! off; every other listener sees the raw line. Handlers can always reach the
//! raw line through [`MatchedMessage::raw_text`].

mod context;
pub mod isolation;
mod listener;
mod registry;
mod router;

pub use context::{IncomingMessage, MatchedMessage, Privilege, Responder};
pub use isolation::Fault;
pub use listener::{Gate, Handler, Listener};
pub use registry::{ListenerRegistry, Registrar};
pub use router::{DispatchSummary, Mention, Router, parse_mention};
