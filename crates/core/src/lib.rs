#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod navigation;
pub mod time;

pub use error::NotFoundError;
pub use navigation::{Cursor, Navigator};
pub use time::Clock;
