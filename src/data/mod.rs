//! Config store layer.
//!
//! The bot persists two small JSON documents, the channel configuration and the admin
//! allow-list. `JsonStore` handles wholesale load/save of a document and the
//! read-modify-write critical section; repositories wrap a store with the operations the
//! service layer needs so services never touch the raw document layout.

pub mod admin;
pub mod channel_config;
pub mod store;

#[cfg(test)]
mod test;
