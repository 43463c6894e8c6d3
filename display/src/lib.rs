pub use audio::{Beeper, Oscillator};
pub use display::SdlDisplay;

mod audio;
mod display;
