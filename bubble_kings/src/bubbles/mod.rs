pub mod observer;
pub mod types;

pub use observer::PopObserver;
pub use types::*;
