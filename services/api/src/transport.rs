mod http;
mod request;
mod routes;

pub use http::{CORS_HEADERS, HttpRequest, HttpResponse};
pub use routes::handle_request;
pub(crate) use request::split_target;
