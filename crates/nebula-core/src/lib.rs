pub mod config;
pub mod constants;
pub mod error;
pub mod generate;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod gesture;
pub mod interaction;
pub mod keys;
pub mod landmarks;
pub mod mode;
pub mod params;
pub mod particles;
pub mod slot;
pub mod smoothing;
pub mod state;
pub mod tracking;
pub mod uniforms;

pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");

pub use config::*;
pub use constants::*;
pub use error::*;
pub use generate::*;
pub use gesture::*;
pub use interaction::*;
pub use keys::*;
pub use landmarks::*;
pub use mode::*;
pub use params::*;
pub use particles::*;
pub use slot::*;
pub use smoothing::*;
pub use state::*;
pub use tracking::*;
pub use uniforms::*;
