//! Application services for user accounts.

mod accounts;

pub use accounts::{
    RegisterUserRequest, UpdateUserRequest, UserService, UserServiceError, UserServiceResult,
};
