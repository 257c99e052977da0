pub mod matcher;
pub mod records;
