//! SMS gateway implementations

mod console;

pub use console::ConsoleSmsSender;
