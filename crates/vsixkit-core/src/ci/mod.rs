pub mod context;

pub use context::CiContext;
