//! Link entities: the short public key routing to a typed resource.

pub mod key;
pub mod kind;
pub mod model;

pub use key::{KEY_ALPHABET, is_key_charset};
pub use kind::{LinkKind, LinkTarget, LinkTypeRecord};
pub use model::{Link, NewLink};
