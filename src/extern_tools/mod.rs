pub mod fast;

pub use fast::{FastTranslator, convert_to_fast, convert_to_fast_with};
