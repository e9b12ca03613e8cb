//! XML helpers on top of `roxmltree`.

mod utils;

pub use utils::*;
