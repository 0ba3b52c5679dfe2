//! Page templates, compiled once at startup.

use handlebars::{Handlebars, RenderError};
use serde::Serialize;

use crate::error::ConfigError;

/// Static page shown when a handler panics.
pub const PANIC_PAGE: &str = include_str!("../../templates/error.html");

const TEMPLATES: &[(&str, &str)] = &[
    ("header", include_str!("../../templates/header.hbs")),
    ("footer", include_str!("../../templates/footer.hbs")),
    ("section", include_str!("../../templates/section.hbs")),
    ("portfolio", include_str!("../../templates/portfolio.hbs")),
    ("login", include_str!("../../templates/login.hbs")),
    ("dashboard", include_str!("../../templates/dashboard.hbs")),
    ("not_found", include_str!("../../templates/not_found.hbs")),
];

/// The site's Handlebars registry. Output is HTML-escaped.
#[derive(Debug)]
pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, ConfigError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, *source)?;
        }
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, RenderError> {
        self.registry.render(name, data)
    }
}
