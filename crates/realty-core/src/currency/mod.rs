pub mod compact;
pub mod indian;
