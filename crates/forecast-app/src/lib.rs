//! Hospitalization Forecast Form
//!
//! Loads the trained model, its column schema and the reference catalog
//! once, then runs the form-to-prediction cycle on a [`FormSurface`].

mod config;
mod logging;
mod session;
mod surface;
mod terminal;

pub use crate::config::{AppConfig, CatalogConfig, CONFIG_FILE};
pub use logging::init_logging;
pub use session::{run_app, AppContext, AppError, CycleOutcome, StartupError, INCOMPLETE_MESSAGE};
pub use surface::{FormSurface, MessageKind, NumberInput, SurfaceError};
pub use terminal::TerminalSurface;
