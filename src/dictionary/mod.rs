mod dictionary;

pub use dictionary::{Dictionary, WILDCARD};
