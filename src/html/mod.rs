//! HTML report assembly.
//!
//! The page is built as an in-memory tree, normalized to the configured
//! locale by the same switcher the browser script mirrors, then serialized
//! with the chart configuration and phrase table embedded.
mod dom;
mod page;
mod script;
mod style;


pub use dom::{NodeId, NodeMut, StaticDocument};
pub use page::{CHART_JS_URL, PageOptions, ReportPage};
pub use script::{CHART_CANVAS_ID, bootstrap_script};

pub(crate) use page::{duration_seconds, requests_cell};
