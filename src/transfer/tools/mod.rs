pub mod analysis;
pub mod combine;
pub mod error;
pub mod io;
pub mod model;
pub mod run;

pub use error::{Result, ToolError};
