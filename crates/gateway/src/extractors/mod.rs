//! Custom extractors.

mod strict_query;
mod validated_json;

pub use strict_query::StrictQuery;
pub use validated_json::ValidatedJson;
