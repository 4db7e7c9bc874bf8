mod params;
mod value;

pub use params::{Lookup, Params};
pub use value::Value;
