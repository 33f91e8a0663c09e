//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod inspect;
pub mod qr;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use inspect::{check_malicious_handler, check_redirects_handler, url_info_handler};
pub use qr::qr_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
