//! Page controllers
//!
//! Pages hold the state behind each screen and decide which queries to issue.
//! They never spawn work themselves; the application shell dispatches the
//! requests they return and feeds the results back.

pub mod detail;
pub mod home;

pub use detail::DetailPage;
pub use home::{apply_search, server_criteria, HomePage, ListRequest, ResultView};
