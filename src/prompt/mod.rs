//! Rendering of user signals and candidates into oracle requests.

pub mod builder;


pub use builder::{PromptBuilder, RenderedRequest};
