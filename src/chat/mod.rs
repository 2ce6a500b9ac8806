//! Conversational intent routing
//!
//! An inbound `(user_id, message)` pair is matched against an ordered rule
//! table and routed to exactly one handler: preference save, preference list,
//! ingredient filter, preference-based recommendation, or the retrieval
//! fallback.

pub mod dispatcher;
pub mod rules;

pub use dispatcher::ChatDispatcher;
pub use rules::Intent;
