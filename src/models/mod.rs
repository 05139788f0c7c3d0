pub mod return_request;

pub use return_request::*;
