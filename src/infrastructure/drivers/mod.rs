mod camera;
pub mod network;
mod ov2640;
mod servo;

pub use camera::{CameraError, CameraPins, EspCamera};
pub use network::{NetworkError, init_network_stack, wait_for_connection};
pub(crate) use network::resolve_host;
pub use ov2640::SensorError;
pub use servo::{EspServo, ServoError};
