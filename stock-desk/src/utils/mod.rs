pub mod format;
pub mod logger;
pub mod prompt;
pub mod receipt_renderer;
