pub mod config;
pub mod error;
pub mod types;

pub use config::{AsyncOrder, InitialCondition, SchedulingMode, SimulationConfig};
pub use error::{FieldError, Result};
pub use types::{Coord, Generation, Strategy};
