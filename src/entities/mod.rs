pub mod prelude;

pub mod todo;
pub mod user;
