//! Generation collaborator: model traits, the shared handle and the remote client.

mod base;
mod remote;
mod resource;
mod tokenizer;

pub use base::{GenerationRequest, ModelLoader, SequenceModel};
pub use remote::{RemoteModel, RemoteModelLoader};
pub use resource::ModelHandle;
pub use tokenizer::{TiktokenCounter, TokenCounter};
