pub mod blog;
pub mod system;
