pub(crate) mod network;
pub(crate) mod sorting;

pub use network::{network_runner_task, wifi_connection_task};
pub use sorting::sorting_task;
