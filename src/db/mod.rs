pub mod pool;
pub mod users;

pub use pool::create_pool;
pub use users::PgCredentialStore;
