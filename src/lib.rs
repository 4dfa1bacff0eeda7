pub mod bag;
pub mod error;
pub mod types;

pub use bag::{MergeSource, ParameterBag};
pub use error::{Error, Result};
pub use types::{Map, Options, Separator, Value};
