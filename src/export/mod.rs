pub mod csv;
pub mod pdf;
