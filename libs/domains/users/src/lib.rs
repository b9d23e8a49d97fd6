//! User management domain: models, validation, service, HTTP handlers, and
//! the MongoDB-backed repository.
//!
//! Layering follows handlers -> service -> repository; the repository is a
//! trait so the service can be tested against a mock.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateUserRequest, ListUsersQuery, UpdateUserStatusRequest, User, UserFilter, UserPage,
    UserResponse, UserStatus,
};
pub use mongodb::MongoUserRepository;
pub use repository::UserRepository;
pub use service::UserService;
