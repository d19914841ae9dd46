pub mod ad;
pub mod catalog;
