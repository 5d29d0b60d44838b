mod transcript;

pub use transcript::{SEED_GREETING, Transcript};
