pub mod http;

pub use http::HttpLabClient;
