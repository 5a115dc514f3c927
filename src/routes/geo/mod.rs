mod handler;
mod model;

pub use handler::{list_nearby, register_location};
pub use model::{NearbyMember, NearbyQuery, RegisterLocationRequest, RegisterLocationResponse};
