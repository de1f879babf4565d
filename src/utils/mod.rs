pub mod precision;

pub use precision::{PRECISION_WIDTH, to_precision_string};
