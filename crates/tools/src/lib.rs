pub mod utf16;
pub mod whitespace;
