use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("invalid phone pattern '{pattern}': {source}")]
    PhonePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
