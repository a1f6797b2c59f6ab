pub mod orders;

pub use orders::{resolve_format, OrderImporter};
