pub mod accounts;
pub mod error;
pub mod messages;
pub mod ports;

pub use accounts::AccountService;
pub use error::ServiceError;
pub use messages::MessageService;

#[cfg(test)]
mod test_support;
