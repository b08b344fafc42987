//! MySQL repository implementations

mod auth_request_repository_impl;
mod token_repository_impl;
mod user_repository_impl;

pub use auth_request_repository_impl::MySqlAuthRequestRepository;
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;
