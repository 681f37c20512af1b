//! Service layer providing address CRUD and proximity search on top of models.
//! - Separates business logic from data access behind `AddressRepository`.
//! - Reuses entity definitions and validation in the `models` crate.

pub mod errors;
pub mod geo;
pub mod address;
#[cfg(test)]
pub mod test_support;
