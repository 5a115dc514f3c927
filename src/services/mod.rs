mod nearby;
mod registration;

pub use nearby::{NearbyService, SEARCH_RADIUS_KM};
pub use registration::RegistrationService;
