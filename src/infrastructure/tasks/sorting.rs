use embassy_time::Delay;
use log::{debug, info};

use crate::infrastructure::types::SortingUsecasesImpl;

/// Endless capture, classify, sort loop
#[embassy_executor::task]
pub async fn sorting_task(mut usecases: SortingUsecasesImpl) {
    let mut delay = Delay;
    info!("sorting: capturing every {} ms", usecases.interval_ms());
    loop {
        if usecases.sort_and_wait(&mut delay).await.is_err() {
            debug!("sorting: cycle skipped, cycles={}", usecases.stats().cycles);
        }
    }
}
