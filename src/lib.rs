//! `reqres-harness` is the client layer of a black-box test harness for a
//! ReqRes-style user-management REST API.
//!
//! The core is a resilient request wrapper: [`ApiClient::request`] retries
//! rate-limited (429) and transient-5xx responses with capped exponential
//! backoff and jitter, while returning every other response untouched.
//! Typed operations cover the user CRUD and auth endpoints:
//! - [`ApiClient::list_users`] / [`ApiClient::get_user`]
//! - [`ApiClient::create_user`] / [`ApiClient::update_user`] /
//!   [`ApiClient::patch_user`] / [`ApiClient::delete_user`]
//! - [`ApiClient::login`] / [`ApiClient::register`] / [`ApiClient::logout`]

mod client;
mod error;
mod model;
mod options;
mod pacing;
mod request;
mod response;
mod retry;

pub use client::ApiClient;
pub use error::HarnessError;
pub use model::{
    ApiErrorBody, AuthToken, CreatedUser, Credentials, NewUser, Registration, Resource,
    ResourcePage, SingleUser, Support, UpdatedUser, User, UserPage,
};
pub use options::ClientOptions;
pub use pacing::Pacer;
pub use request::RequestOptions;
pub use response::{ApiResponse, RETRIES_EXHAUSTED_HEADER};
pub use retry::{RetryPolicy, MAX_JITTER_FRACTION};

pub type Result<T> = std::result::Result<T, HarnessError>;
