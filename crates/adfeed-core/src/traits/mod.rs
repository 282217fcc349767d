//! Contracts between the transport, repository and controller layers.

mod data_source;
mod repository;

pub use data_source::AdDataSource;
pub use repository::AdRepository;
