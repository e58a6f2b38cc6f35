pub mod diagnostics;
pub mod dose;
pub mod error;
pub mod io;
pub mod metrics;
pub mod processor;
pub mod signal;
pub mod timing;

pub use dose::*;
pub use error::{Error, Result};
pub use metrics::baseline::*;
pub use processor::*;
pub use signal::*;
