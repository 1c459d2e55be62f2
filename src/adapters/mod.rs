// Adapters layer: concrete dataset providers.

pub mod embedded;
pub mod memory;
pub mod toml_file;

pub use embedded::EmbeddedDemoProvider;
pub use memory::InMemoryProvider;
pub use toml_file::TomlFileProvider;
