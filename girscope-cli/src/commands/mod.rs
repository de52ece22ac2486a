pub mod common;
pub mod entries;
pub mod info;
pub mod validate;
