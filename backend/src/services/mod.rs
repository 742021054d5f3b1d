//! Business logic services for the Weather News System

pub mod observation;

pub use observation::ObservationService;
