pub mod client;
pub mod source;

pub use client::{connect, new_mysql_pool};
pub use source::MySqlRowSource;
