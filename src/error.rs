use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid merge source: expected a map or a parameter bag, got {0}")]
    InvalidArgument(&'static str),
}
