pub mod parse;
pub mod phrase;
