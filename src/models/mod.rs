pub mod book;
pub mod order;

pub use book::Book;
pub use order::Order;
