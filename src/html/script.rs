use serde::Serialize;

use crate::chart::RenderableChart;
use crate::error::SinkError;
use crate::i18n::{ACTIVE_CLASS, Dictionary, Locale, REPORT_TITLE_ID, ReportTitle};

pub const CHART_CANVAS_ID: &str = "performanceChart";

const TEMPLATE: &str = r#"(function () {
    const chartConfig = __CHART_CONFIG__;
    const tooltipDecimals = __TOOLTIP_DECIMALS__;
    const translations = __TRANSLATIONS__;
    const reportTitles = __REPORT_TITLES__;

    chartConfig.options.plugins.tooltip = {
        callbacks: {
            label: function (context) {
                let label = context.dataset.label || '';
                if (label) {
                    label += ': ';
                }
                if (context.parsed.y !== null) {
                    label += context.parsed.y.toFixed(tooltipDecimals);
                }
                return label;
            }
        }
    };

    const canvas = document.getElementById('__CANVAS_ID__');
    if (canvas && typeof Chart !== 'undefined') {
        new Chart(canvas.getContext('2d'), chartConfig);
    }

    function switchLanguage(lang) {
        const phrases = translations[lang];
        if (!phrases) {
            return;
        }
        ['en', 'zh'].forEach(function (code) {
            const control = document.getElementById('lang-' + code);
            if (control) {
                control.classList.toggle('__ACTIVE_CLASS__', code === lang);
            }
        });
        document.querySelectorAll('[data-i18n]').forEach(function (element) {
            const key = element.getAttribute('data-i18n');
            if (!Object.prototype.hasOwnProperty.call(phrases, key)) {
                return;
            }
            if (['H1', 'H2', 'H3'].includes(element.tagName)) {
                element.textContent = phrases[key];
            } else {
                element.innerHTML = phrases[key];
            }
        });
        const title = document.getElementById('__TITLE_ID__');
        if (title) {
            title.textContent = reportTitles[lang];
        }
        document.title = reportTitles[lang];
        document.documentElement.lang = lang;
    }

    ['en', 'zh'].forEach(function (code) {
        const control = document.getElementById('lang-' + code);
        if (control) {
            control.addEventListener('click', function () {
                switchLanguage(code);
            });
        }
    });

    switchLanguage('__INITIAL_LOCALE__');
})();
"#;

/// Renders the browser bootstrap: chart construction plus the language
/// switcher mirroring [`crate::i18n::LocaleSwitcher`].
///
/// # Errors
///
/// Returns [`SinkError::Serialize`] when an embedded payload cannot be
/// encoded as JSON.
pub fn bootstrap_script(
    chart: &RenderableChart,
    dictionary: &Dictionary,
    title: &ReportTitle,
    initial: Locale,
) -> Result<String, SinkError> {
    let chart_config = embed("chart configuration", chart)?;
    let tooltip_decimals = chart.tooltip.decimals.to_string();
    let translations = embed("translations", dictionary)?;
    let report_titles = embed("report titles", title)?;
    Ok(fill(
        TEMPLATE,
        &[
            ("__CHART_CONFIG__", chart_config.as_str()),
            ("__TOOLTIP_DECIMALS__", tooltip_decimals.as_str()),
            ("__TRANSLATIONS__", translations.as_str()),
            ("__REPORT_TITLES__", report_titles.as_str()),
            ("__CANVAS_ID__", CHART_CANVAS_ID),
            ("__ACTIVE_CLASS__", ACTIVE_CLASS),
            ("__TITLE_ID__", REPORT_TITLE_ID),
            ("__INITIAL_LOCALE__", initial.code()),
        ],
    ))
}

/// Substitutes every placeholder in a single left-to-right pass; inserted
/// values are never scanned again.
fn fill(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some((at, placeholder, value)) = slots
        .iter()
        .filter_map(|(placeholder, value)| {
            rest.find(placeholder).map(|at| (at, *placeholder, *value))
        })
        .min_by_key(|(at, _, _)| *at)
    {
        out.push_str(rest.get(..at).unwrap_or_default());
        out.push_str(value);
        rest = rest
            .get(at.saturating_add(placeholder.len())..)
            .unwrap_or_default();
    }
    out.push_str(rest);
    out
}

/// JSON safe to place inside a `<script>` element. Every `<` is escaped, so
/// neither `</script>` nor `<!--` can appear in the payload.
fn embed<T: Serialize + ?Sized>(context: &'static str, value: &T) -> Result<String, SinkError> {
    serde_json::to_string(value)
        .map(|json| json.replace('<', "\\u003c"))
        .map_err(|source| SinkError::Serialize { context, source })
}
