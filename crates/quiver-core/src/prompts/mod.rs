pub mod context;

pub use context::ContextBuilder;
