pub mod access_log;
pub mod https;
pub mod rate_limit;
pub mod security_headers;
pub mod session;
