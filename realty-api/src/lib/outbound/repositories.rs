pub mod memory;
pub mod revoked_token;
pub mod user;

pub use memory::InMemoryRevokedTokenRepository;
pub use memory::InMemoryUserRepository;
pub use revoked_token::PostgresRevokedTokenRepository;
pub use user::PostgresUserRepository;
