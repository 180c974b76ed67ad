pub mod bits;
pub mod op;
