//! HTML page templates and placeholder substitution.
//!
//! Templates are immutable string constants addressed by [`TemplateId`].
//! Rendering always substitutes into a freshly produced buffer; the stored
//! template is never touched, so one render cannot corrupt the next.
//!
//! Placeholders are fixed substrings (e.g. `HOST_$`). Values the caller does
//! not supply, and tokens the template does not contain, pass through
//! unchanged: the default renderer never fails. A render that omits `HOST_$`
//! produces a page with broken asset links; that is documented behavior, not
//! an error ([`Renderer::render_strict`] is the opt-in hard mode).

/// Placeholder substituted with the configured host in asset URLs.
pub const HOST_TOKEN: &str = "HOST_$";

/// Placeholder substituted with a fill color.
pub const COLOR_TOKEN: &str = "COLOR_";

/// Placeholder substituted with the valve caption.
pub const TEXT_TOKEN: &str = "TEXT_";

/// Placeholder substituted with the ON/OFF/OFFLINE state string.
pub const STATUS_TOKEN: &str = "status_$";

/// Placeholder substituted with the slot number in element ids.
pub const SLOT_TOKEN: &str = "NO_$";

const KNOWN_TOKENS: [&str; 5] = [HOST_TOKEN, COLOR_TOKEN, TEXT_TOKEN, STATUS_TOKEN, SLOT_TOKEN];

const PAGE_START: &str = concat!(
    r#"<html><head>"#,
    r#"<script src="https://ajax.googleapis.com/ajax/libs/jquery/3.3.1/jquery.min.js"></script>"#,
    r#"<script src="http://HOST_$/valves/script.js"></script>"#,
    r#"<link rel="stylesheet" href="http://HOST_$/valves/style.css">"#,
    r#"</head><body><div class='header'>Valve Control System</div>"#,
);

const PAGE_START_NOSCRIPT: &str =
    r#"<html><head></head><body><div class='header'>Valve Control System</div>"#;

const PAGE_END: &str = r#"</body></html>"#;

const WIFI_SETUP_FORM: &str = concat!(
    r#"<form action="configuration.save" method="POST">"#,
    r#"<label for="_ssid">SSID</label><input type="text" name="_ssid"/>"#,
    r#"<label for="_password">Password</label><input type="password" name="_password"/>"#,
    r#"<label for="_host">Host</label><input type="text" name="_host"/>"#,
    r#"<input type="submit" /></form>"#,
);

const VALVE_FRAGMENT: &str = concat!(
    r#"<div class='valve' id='valve_NO_$' status='status_$'>"#,
    r#"<svg viewBox='0 0 64 48'>"#,
    r#"<path id='valve_path_NO_$' fill='COLOR_' "#,
    r#"d='M4 18h18v14H4z M42 18h18v14H42z M22 20h20v10H22z M30 10h4v10h-4z M22 8h20v4H22z'/>"#,
    r#"</svg>"#,
    r#"<div class='valvetext' id='valve_text_NO_$'>TEXT_</div></div>"#,
);

/// Identifies one of the built-in page templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateId {
    /// Page head with jQuery plus host-relative script/style includes.
    PageStart,
    /// Page head without any script includes (setup flow).
    PageStartNoScript,
    PageEnd,
    /// Credentials form posting to `configuration.save`.
    WifiSetupForm,
    /// One valve tile: status attribute, SVG glyph, caption.
    ValveFragment,
}

impl TemplateId {
    /// The immutable template source.
    pub fn source(self) -> &'static str {
        match self {
            TemplateId::PageStart => PAGE_START,
            TemplateId::PageStartNoScript => PAGE_START_NOSCRIPT,
            TemplateId::PageEnd => PAGE_END,
            TemplateId::WifiSetupForm => WIFI_SETUP_FORM,
            TemplateId::ValveFragment => VALVE_FRAGMENT,
        }
    }
}

/// Whether substitution replaces every occurrence of a token or only the
/// first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplacePolicy {
    /// Replace every occurrence. The default: `PageStart` references the
    /// host twice and both links must resolve.
    #[default]
    All,
    /// Replace only the first occurrence.
    FirstOnly,
}

/// Errors raised by strict-mode rendering.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("placeholder {token} left unresolved")]
    UnresolvedPlaceholder { token: &'static str },
}

/// Produces fully substituted HTML from a template plus placeholder values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    policy: ReplacePolicy,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ReplacePolicy) -> Self {
        Self { policy }
    }

    /// Substitute `values` (token, replacement) pairs into the template
    /// identified by `id`, returning a new string.
    pub fn render(&self, id: TemplateId, values: &[(&str, &str)]) -> String {
        let mut out = id.source().to_owned();
        for (token, value) in values {
            match self.policy {
                ReplacePolicy::All => out = out.replace(token, value),
                ReplacePolicy::FirstOnly => {
                    if let Some(at) = out.find(token) {
                        out.replace_range(at..at + token.len(), value);
                    }
                }
            }
        }
        out
    }

    /// Like [`Renderer::render`], but fails if any known placeholder token
    /// survives substitution.
    pub fn render_strict(
        &self,
        id: TemplateId,
        values: &[(&str, &str)],
    ) -> Result<String, RenderError> {
        let out = self.render(id, values);
        for token in KNOWN_TOKENS {
            if out.contains(token) {
                return Err(RenderError::UnresolvedPlaceholder { token });
            }
        }
        Ok(out)
    }
}
