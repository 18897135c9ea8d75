//! Record types shared by the store, the aggregation core and the API.
//!
//! Wire names are the canonical JSON schema: identifiers are `xxxUUID`,
//! everything else is camelCase.

pub mod appointment;
pub mod doctor;
pub mod document;
pub mod notification;
pub mod patient;
pub mod prescription;

pub use appointment::*;
pub use doctor::*;
pub use document::*;
pub use notification::*;
pub use patient::*;
pub use prescription::*;
