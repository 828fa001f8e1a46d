pub mod date_ops;
mod generation_window;

pub use generation_window::GenerationWindow;
