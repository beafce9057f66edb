//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Each trait exposes a strongly typed error so adapters map their failures
//! into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod menu_repository;
mod rating_repository;
mod user_repository;

#[cfg(test)]
pub use menu_repository::MockMenuRepository;
pub use menu_repository::{MenuRepository, MenuRepositoryError};
#[cfg(test)]
pub use rating_repository::MockRatingRepository;
pub use rating_repository::{RatingRepository, RatingRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredUser, UserPersistenceError, UserRepository};
