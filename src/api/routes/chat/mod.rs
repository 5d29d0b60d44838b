pub mod public;
mod router;
mod view;

pub use router::router;
