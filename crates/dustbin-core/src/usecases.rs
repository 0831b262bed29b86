use embedded_hal_async::delay::DelayNs;
use log::{info, warn};

use crate::hint::BinKind;
use crate::material::Material;
use crate::ports::{BinActuator, Classifier, FrameSource};
use crate::report::ClassificationReport;
use crate::servo::{BinPositions, ServoAngle};
use crate::stats::SortingStats;

/// Default pause between two capture attempts.
pub const DEFAULT_CAPTURE_INTERVAL_MS: u32 = 5_000;

/// What happened to the upload of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Classifier answered with this status code
    Delivered(u16),
    /// Frame never reached the classifier or no reply came back
    Failed,
}

/// Result of a sorting cycle that got as far as a bin decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortingOutcome {
    pub bin: BinKind,
    pub angle: ServoAngle,
    pub delivery: Delivery,
    /// Material reported by the classifier, if it sent a known one
    pub material: Option<Material>,
    /// Whether the servo confirmed the move
    pub actuated: bool,
}

#[derive(Debug)]
pub enum SortingError<E> {
    /// Camera produced no usable frame, nothing was sent or moved
    Capture(E),
}

/// The capture, send, inspect, actuate cycle.
pub struct SortingUsecases<F: FrameSource, C: Classifier, A: BinActuator> {
    camera: F,
    classifier: C,
    actuator: A,
    positions: BinPositions,
    interval_ms: u32,
    stats: SortingStats,
}

impl<F: FrameSource, C: Classifier, A: BinActuator> SortingUsecases<F, C, A> {
    pub fn new(camera: F, classifier: C, actuator: A) -> Self {
        Self {
            camera,
            classifier,
            actuator,
            positions: BinPositions::new(),
            interval_ms: DEFAULT_CAPTURE_INTERVAL_MS,
            stats: SortingStats::new(),
        }
    }

    /// Override the servo positions of the bins.
    #[must_use]
    pub fn with_positions(mut self, positions: BinPositions) -> Self {
        self.positions = positions;
        self
    }

    /// Override the pause between capture attempts.
    #[must_use]
    pub fn with_interval_ms(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn stats(&self) -> &SortingStats {
        &self.stats
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Give back the camera, classifier and actuator.
    pub fn into_parts(self) -> (F, C, A) {
        (self.camera, self.classifier, self.actuator)
    }

    /// Run one cycle.
    ///
    /// A failed upload still moves the flap, to the general bin. A failed
    /// capture moves nothing.
    pub async fn sort_once(&mut self) -> Result<SortingOutcome, SortingError<F::Error>> {
        self.stats.cycles = self.stats.cycles.wrapping_add(1);

        let frame = match self.camera.capture().await {
            Ok(frame) => frame,
            Err(e) => {
                self.stats.capture_failures = self.stats.capture_failures.wrapping_add(1);
                warn!("sorting: capture failed: {:?}", e);
                return Err(SortingError::Capture(e));
            }
        };
        info!("sorting: captured frame of {} bytes", frame.len());

        let (bin, delivery, material) = match self.classifier.classify(frame).await {
            Ok(reply) => {
                let bin = BinKind::from_reply(reply.status, reply.body);
                let report = ClassificationReport::parse(reply.body);
                if let Some(report) = &report {
                    info!(
                        "sorting: classifier says class={} bin={} command={}",
                        report.class.unwrap_or("-"),
                        report.bin.unwrap_or("-"),
                        report.command.unwrap_or("-"),
                    );
                    if let Some(error) = report.error {
                        warn!("sorting: classifier error: {}", error);
                    }
                }
                (
                    bin,
                    Delivery::Delivered(reply.status),
                    report.and_then(|r| r.material()),
                )
            }
            Err(e) => {
                self.stats.delivery_failures = self.stats.delivery_failures.wrapping_add(1);
                warn!("sorting: upload failed: {:?}", e);
                (BinKind::General, Delivery::Failed, None)
            }
        };

        let angle = bin.target_angle(&self.positions);
        let actuated = match self.actuator.move_to(angle).await {
            Ok(()) => true,
            Err(e) => {
                self.stats.actuation_failures = self.stats.actuation_failures.wrapping_add(1);
                warn!("sorting: servo move to {} failed: {:?}", angle, e);
                false
            }
        };
        self.stats.record_bin(bin);

        info!(
            "sorting: {} bin ({}), sorted={} recycle={} general={}",
            bin,
            angle,
            self.stats.sorted(),
            self.stats.recycle,
            self.stats.general,
        );

        Ok(SortingOutcome {
            bin,
            angle,
            delivery,
            material,
            actuated,
        })
    }

    /// Run one cycle, then wait the capture interval.
    ///
    /// The wait is unconditional, so consecutive capture attempts are at
    /// least one interval apart whatever the cycle did.
    pub async fn sort_and_wait(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<SortingOutcome, SortingError<F::Error>> {
        let result = self.sort_once().await;
        delay.delay_ms(self.interval_ms).await;
        result
    }
}
