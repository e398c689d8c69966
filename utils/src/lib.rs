mod db;
mod file;
pub mod testing;

pub use db::migrate;
pub use file::{ensure_dir, ensure_sqlite_file};
