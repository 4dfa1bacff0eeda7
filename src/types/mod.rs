pub mod options;
pub mod separator;
pub mod value;

pub use options::Options;
pub use separator::Separator;
pub use value::{Map, Value};
