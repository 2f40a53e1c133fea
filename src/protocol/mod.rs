pub mod connection;
pub mod cursor;
pub mod primitive;


pub use cursor::ByteCursor;
