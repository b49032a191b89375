pub mod category;
pub mod guest;
pub mod session;
pub mod sheet_row;
