pub mod auth;
pub mod classes;
pub mod students;

pub use self::auth::model::LoginRequest;
pub use self::classes::model::Class;
pub use self::students::model::Student;
