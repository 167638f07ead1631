pub mod handlers;
pub mod wallet;

pub use wallet::Service;
