// Login, registration and the per-request session built from a bearer token.
// Identity itself lives in the content API; this module only brokers it.

pub mod handlers;
pub mod session;
