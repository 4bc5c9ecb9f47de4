pub mod writer;

pub use writer::{escape_field, render, HEADER, UNNAMED_ITEM};
