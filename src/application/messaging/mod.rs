//! Message handling - Normalisation, ordered dispatch and rate limiting

pub mod dispatcher;
pub mod parser;
pub mod rate_limit;

pub use dispatcher::{CommandDispatcher, Rule};
pub use parser::{MessageParser, ParsedCommand};
pub use rate_limit::RateLimiter;
