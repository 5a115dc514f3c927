mod nearby;

pub use nearby::{
    LocationRecord, NeighborEntry, NeighborPage, PageRequest, RadiusQuery, SortOrder,
};
