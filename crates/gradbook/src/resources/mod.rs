//! Per-resource calls of the admin console.
//!
//! Each submodule adds methods to [`ApiClient`](crate::client::ApiClient) and
//! defines the filters and payloads for its endpoints. Listings decode through
//! [`Envelope`](crate::envelope::Envelope), so bare arrays and missing payloads
//! fall back the same way everywhere.

pub mod academic;
pub mod analytics;
pub mod auth;
pub mod posts;
pub mod questions;
pub mod reports;
pub mod tags;
pub mod users;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub use self::academic::{NewCampus, NewCollege, NewDepartment};
pub use self::auth::LoginResponse;
pub use self::posts::PostFilters;
pub use self::questions::{QuestionFilters, QuestionInput};
pub use self::reports::{ReportFilters, ReviewReport};
pub use self::tags::{TagFilters, TagInput};
pub use self::users::UserFilters;

/// Unreserved characters stay literal in a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode an id so it cannot escape its path segment.
pub(crate) fn segment(id: &str) -> String {
    utf8_percent_encode(id, SEGMENT).to_string()
}
