//! Media module for profile and post representation and parsing.

pub mod item;
pub mod parser;
pub mod profile;

pub use item::{MediaRef, Post};
pub use parser::{parse_post, parse_profile};
pub use profile::Profile;
