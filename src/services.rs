pub mod observation_service;
pub mod response_shaper;

pub use observation_service::{ObservationError, ObservationService};
