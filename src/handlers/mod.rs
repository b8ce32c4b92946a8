pub mod health;
pub mod screen;

pub use health::*;
pub use screen::*;
