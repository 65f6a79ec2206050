//! Core types for the wirecast response mapper.
//!
//! This crate provides the vocabulary shared by the description loader,
//! the response parser and the CLI: where a value lives in a response
//! ([`Location`]), how a command wants its response processed
//! ([`ProcessingMode`], [`ResponseKind`]) and the wire response itself
//! ([`Response`]).

mod location;
mod response;
mod types;

pub use location::Location;
pub use response::{MAX_HEADERS, Response, ResponseError};
pub use types::{ProcessingMode, ResponseKind};
