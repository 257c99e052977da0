pub mod listings;
pub mod loan;
pub mod price;
