mod core;
mod gateway;

pub use core::{GatewayError, Message, Role, completion};
pub use gateway::{CompletionGateway, GroqGateway};
