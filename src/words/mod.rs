//! Word resolution and dictionary validation
//!
//! Nothing here touches game state. Validation passes are tagged with a
//! sequence number so the session can drop answers that arrive late.

pub mod cache;
pub mod oracle;
pub mod resolve;

pub use cache::ValidationCache;
pub use oracle::{
    DictionaryOracle, OracleError, WordListOracle, dictionary_lookup_url,
    interpret_lookup_response,
};
pub use resolve::{
    ValidationOutcome, ValidationSequence, ValidationTicket, resolve_submitted_word,
    wildcard_candidates,
};
