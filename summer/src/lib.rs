mod args;
pub use args::Args;

mod builtin;
pub use builtin::Builtin;
