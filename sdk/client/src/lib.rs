mod builder;
mod client;
mod error;
mod registry;

pub mod token;
pub mod topic;

pub use {
  builder::TransactionBuilder,
  client::Client,
  error::{ClientError, ConfigurationError, Error, QueryError},
  registry::{role_name, Account, AccountEntry, AccountRegistry},
};
