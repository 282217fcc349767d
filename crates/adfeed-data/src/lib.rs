//! adfeed-data - Mapping from wire records to domain ads, and the repository
//! the controllers talk to.

mod mapper;
mod repository;
mod travel;

pub use mapper::AdMapper;
pub use repository::DefaultAdRepository;
pub use travel::{FixedTravelEstimator, RandomTravelEstimator, TravelEstimator};
