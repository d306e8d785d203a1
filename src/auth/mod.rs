//! Authentication: register, login, password hashing, JWT.

mod handlers;
mod jwt;
mod password;
mod validation;

pub use handlers::{login, register};
pub use jwt::{Claims, JwtSecret};
pub use password::{hash_password, verify_password};
pub use validation::{validate_login, validate_register};
