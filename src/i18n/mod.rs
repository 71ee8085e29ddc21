//! Bilingual text rendering.
//!
//! Elements tagged with a translation key are rewritten from a static phrase
//! dictionary whenever the active locale changes. The document is reached
//! only through the [`Document`] capability, so the same switcher drives the
//! in-memory page at generation time and can be exercised without a browser.
mod dictionary;
mod document;
mod locale;
mod switcher;


pub use dictionary::Dictionary;
pub use document::Document;
pub use locale::Locale;
pub use switcher::{
    ACTIVE_CLASS, LocaleState, LocaleSwitcher, REPORT_TITLE_ID, ReportTitle,
    TRANSLATION_ATTRIBUTE,
};
