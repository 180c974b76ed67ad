pub mod addr;
pub mod assembler;
pub mod cursor;
pub mod emit;
pub mod entry;
pub mod error;
pub mod symbols;
