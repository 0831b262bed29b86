#![cfg_attr(not(test), no_std)]

//! Smart dustbin sorting core
//!
//! Hardware independent part of the dustbin firmware:
//! - `frame` - JPEG frame validation and extraction from raw captures
//! - `hint` - classification reply inspection (`Recycle` or not)
//! - `report` - structured view of the classifier JSON, for logging
//! - `material` - waste categories known to the classifier
//! - `servo` - bin positions and PWM pulse math
//! - `endpoint`, `http` - request/response framing for the upload
//! - `ports` - traits implemented by the hardware layer
//! - `usecases` - the capture, send, inspect, actuate cycle

pub mod endpoint;
pub mod frame;
pub mod hint;
pub mod http;
pub mod material;
pub mod ports;
pub mod report;
pub mod servo;
pub mod stats;
pub mod usecases;

pub use endpoint::{Endpoint, EndpointError};
pub use frame::{Frame, FrameError, extract_jpeg};
pub use hint::BinKind;
pub use http::{
    ReadError, RequestHead, Response, ResponseHead, UploadEncoding, parse_response_head,
    read_response,
};
pub use material::Material;
pub use ports::{BinActuator, Classifier, ClassifierReply, FrameSource};
pub use report::ClassificationReport;
pub use servo::{BinPositions, ServoAngle, ServoCalibration};
pub use stats::SortingStats;
pub use usecases::{Delivery, SortingError, SortingOutcome, SortingUsecases};
