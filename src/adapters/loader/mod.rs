//! Form loader adapters.

mod file_loader;
mod static_loader;

pub use file_loader::FileFormLoader;
pub use static_loader::StaticFormLoader;
