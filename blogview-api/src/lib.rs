pub use reqwest;

pub mod model;

mod inner;
pub use inner::{API, DEFAULT_BASE_URL};
