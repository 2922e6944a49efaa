pub mod assignments;

pub mod auth;

pub mod doubts;

pub mod homeworks;

pub mod students;

pub mod system;

#[cfg(test)]
pub(crate) mod test_support;

pub mod users;

pub mod worksheets;

pub use assignments::configure_assignments_routes;
pub use auth::configure_auth_routes;
pub use doubts::configure_doubts_routes;
pub use homeworks::configure_homeworks_routes;
pub use students::configure_students_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
pub use worksheets::configure_worksheets_routes;
