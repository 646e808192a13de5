pub mod http;

pub use http::{post_empty, post_json, Delivery};
