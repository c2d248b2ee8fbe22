//! Value objects: immutable, compared by value, valid by construction.

pub mod address;
pub mod document;
pub mod email;
pub mod money;
pub mod person_name;

pub use address::{Address, AddressParts};
pub use document::{Document, DocumentKind};
pub use email::Email;
pub use money::Money;
pub use person_name::PersonName;
