use dustbin_core::SortingUsecases;

use crate::infrastructure::{
    config,
    drivers::{EspCamera, EspServo},
    services::HttpClassifier,
};

pub type SortingUsecasesImpl = SortingUsecases<EspCamera, HttpClassifier, EspServo>;

/// Wire the drivers into the sorting loop with the configured bin positions
/// and capture interval.
pub fn sorting_usecases(
    camera: EspCamera,
    classifier: HttpClassifier,
    servo: EspServo,
) -> SortingUsecasesImpl {
    SortingUsecases::new(camera, classifier, servo)
        .with_positions(config::SORTING.positions)
        .with_interval_ms(config::SORTING.interval_ms)
}
