use thiserror::Error;

/// The name store could not answer a query.
///
/// This is never the same thing as "name not found": every operation that
/// touches the store hands it back to the caller unchanged.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("name store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum GazetteerLoadingError {
    #[error("cannot read gazetteer from file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("malformed gazetteer file: {0}")]
    Deserialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum GazetteerSavingError {
    #[error("cannot write gazetteer into file: {0}")]
    WriteFile(#[from] std::io::Error),
    #[error("can't serialize gazetteer: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("no text provided")]
    Empty,
    #[error("input too long: {length} characters, maximum is {max}")]
    TooLong { length: usize, max: usize },
}
