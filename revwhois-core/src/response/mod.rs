mod parser;
mod types;

pub use parser::parse_response;
pub use types::{Domain, ErrorMessage, Response};
