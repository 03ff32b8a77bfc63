pub mod classifier;
pub mod config;
pub mod detect;
pub mod error;
pub mod io;
pub mod lock;
pub mod paths;
pub mod report;
pub mod roadmap;
pub mod status;
pub mod store;
pub mod transition;
pub mod types;

pub use error::{Result, TddError};
