//! Interfaces the sorting cycle needs from the hardware layer.

use core::fmt::Debug;

use crate::frame::Frame;
use crate::servo::ServoAngle;

/// Reply of the classification endpoint.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierReply<'a> {
    pub status: u16,
    pub body: &'a [u8],
}

/// Camera that produces one JPEG frame per call.
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    type Error: Debug;

    /// Capture a frame. The frame borrows the source until it is dropped.
    async fn capture(&mut self) -> Result<Frame<'_>, Self::Error>;
}

/// Remote image classifier.
#[allow(async_fn_in_trait)]
pub trait Classifier {
    type Error: Debug;

    /// Upload the frame and return the raw reply.
    async fn classify(&mut self, frame: Frame<'_>) -> Result<ClassifierReply<'_>, Self::Error>;
}

/// Flap that directs the item into one of the bins.
#[allow(async_fn_in_trait)]
pub trait BinActuator {
    type Error: Debug;

    /// Move to the angle.
    async fn move_to(&mut self, angle: ServoAngle) -> Result<(), Self::Error>;
}
