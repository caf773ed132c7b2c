pub mod errors;
pub mod db;
pub mod user;
pub mod user_credentials;
pub mod catalog;
pub mod order;
pub mod order_details;
pub mod order_deletion_log;

#[cfg(test)]
mod tests;
