//! Application services for user accounts and roles.

mod access;
mod seeder;

pub use access::{
    CreateUserRequest, UserAccessError, UserAccessResult, UserAccessService,
};
pub use seeder::RoleSeeder;
