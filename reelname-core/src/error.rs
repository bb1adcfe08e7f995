use thiserror::Error;

/// Configuration-time failures. Engine operations on names never return
/// these; they only surface while building templates and rule sets.
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("naming template '{template}' has no '#' placeholder")]
    MissingPlaceholder { template: String },

    #[error("shot token rule '{name}' has an invalid pattern")]
    InvalidRule {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error(
        "shot token rule '{name}' defines none of the scene, shot or take groups"
    )]
    NoTokenGroups { name: String },
}

pub type Result<T> = std::result::Result<T, PatternError>;
