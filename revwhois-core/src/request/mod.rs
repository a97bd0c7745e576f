mod options;
mod payload;

pub use options::{AdvancedTerm, BasicTerms, Mode, QueryOptions, ResponseFormat, SearchType};
pub use payload::RequestPayload;
