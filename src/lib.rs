mod api;
pub mod args;
pub mod commands;
mod config;
mod error;
mod export;
pub mod model;
mod normalize;
mod utils;

pub use api::Mode;
pub use config::{CompanyCredential, Config};
pub use error::Error;
pub use error::ErrorType;
pub use error::Result;
