//! Address store abstraction and the service built on it.

pub mod memory;
pub mod repository;
pub mod service;

pub use memory::InMemoryAddressRepository;
pub use repository::{AddressRepository, SeaOrmAddressRepository};
pub use service::AddressService;
