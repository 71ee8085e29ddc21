use serde::Serialize;
use tracing::debug;

use crate::error::LocaleError;

use super::dictionary::Dictionary;
use super::document::Document;
use super::locale::Locale;

pub const TRANSLATION_ATTRIBUTE: &str = "data-i18n";
pub const REPORT_TITLE_ID: &str = "report-title";
pub const ACTIVE_CLASS: &str = "active";

const HEADING_TAGS: [&str; 3] = ["h1", "h2", "h3"];

/// Branded report title, one literal per locale.
///
/// Kept out of the dictionary: the title carries the product name and is
/// never looked up by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTitle {
    en: String,
    zh: String,
}

impl ReportTitle {
    #[must_use]
    pub fn for_brand(brand: &str) -> Self {
        Self {
            en: format!("{} Performance Report", brand),
            zh: format!("{} 性能报告", brand),
        }
    }

    #[must_use]
    pub fn text(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Zh => &self.zh,
        }
    }
}

/// Active language plus the read-only phrase table.
#[derive(Debug, Clone)]
pub struct LocaleState {
    active_language: Locale,
    dictionary: Dictionary,
}

impl LocaleState {
    #[must_use]
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            active_language: Locale::default(),
            dictionary,
        }
    }

    #[must_use]
    pub const fn active_language(&self) -> Locale {
        self.active_language
    }

    #[must_use]
    pub const fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

/// Two-state (en/zh) text synchronizer over a [`Document`].
#[derive(Debug)]
pub struct LocaleSwitcher<D: Document> {
    document: D,
    state: LocaleState,
    title: ReportTitle,
}

impl<D: Document> LocaleSwitcher<D> {
    #[must_use]
    pub const fn new(document: D, state: LocaleState, title: ReportTitle) -> Self {
        Self {
            document,
            state,
            title,
        }
    }

    /// Brings authored markup into a consistent state before any user
    /// interaction.
    pub fn initialize(&mut self, locale: Locale) {
        self.apply(locale);
    }

    /// Switches to the locale named by `code`.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError::Unsupported`] for codes other than `en` and
    /// `zh`; the document and the active language are left untouched.
    pub fn switch_language(&mut self, code: &str) -> Result<(), LocaleError> {
        let locale = code.parse::<Locale>()?;
        self.apply(locale);
        Ok(())
    }

    /// Click handler for the language selector controls.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError::UnknownControl`] when `control_id` is not one of
    /// the selector controls.
    pub fn handle_control(&mut self, control_id: &str) -> Result<(), LocaleError> {
        let locale =
            Locale::from_control_id(control_id).ok_or_else(|| LocaleError::UnknownControl {
                id: control_id.to_owned(),
            })?;
        self.apply(locale);
        Ok(())
    }

    pub fn apply(&mut self, locale: Locale) {
        self.state.active_language = locale;

        for candidate in Locale::ALL {
            if let Some(control) = self.document.element_by_id(candidate.control_id()) {
                self.document
                    .toggle_class(control, ACTIVE_CLASS, candidate == locale);
            }
        }

        for element in self.document.elements_with_attribute(TRANSLATION_ATTRIBUTE) {
            let Some(key) = self
                .document
                .attribute(element, TRANSLATION_ATTRIBUTE)
                .map(str::to_owned)
            else {
                continue;
            };
            let Some(phrase) = self.state.dictionary.lookup(locale, &key) else {
                debug!("No '{}' phrase for key '{}', leaving text as is", locale, key);
                continue;
            };
            if is_heading(self.document.tag_name(element)) {
                self.document.set_text(element, phrase);
            } else {
                self.document.set_markup(element, phrase);
            }
        }

        let title = self.title.text(locale);
        if let Some(heading) = self.document.element_by_id(REPORT_TITLE_ID) {
            self.document.set_text(heading, title);
        }
        self.document.set_document_title(title);
    }

    #[must_use]
    pub const fn active_language(&self) -> Locale {
        self.state.active_language
    }

    #[must_use]
    pub const fn state(&self) -> &LocaleState {
        &self.state
    }

    #[must_use]
    pub const fn document(&self) -> &D {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> D {
        self.document
    }
}

fn is_heading(tag: &str) -> bool {
    HEADING_TAGS
        .iter()
        .any(|heading| heading.eq_ignore_ascii_case(tag))
}
