// Call transcript analysis: data model, reply extraction, orchestration, HTTP handlers.
// All completion API calls go through llm_client; nothing here talks HTTP outbound.

pub mod analyzer;
pub mod extract;
pub mod handlers;
pub mod models;
