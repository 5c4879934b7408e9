mod cadence;
mod controller;
mod driver;
mod engine;
mod stick;

pub use cadence::{Cadence, TICK_PERIOD};
pub use controller::TimerController;
pub use driver::{drive, Command};
pub use engine::{TimerEngine, TimerState};
pub use stick::StickLength;
