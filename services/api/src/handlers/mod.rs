pub mod admin;
pub mod links;
pub mod users;
pub mod withdrawals;
