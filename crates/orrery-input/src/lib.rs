//! Input routing: discrete key events and slider values translated into the
//! state toggles and configuration changes the rest of the engine consumes.

pub mod keyboard;
pub mod sliders;

pub use keyboard::InputRouter;
pub use sliders::SliderBank;
