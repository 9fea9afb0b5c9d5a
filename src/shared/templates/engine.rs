//! Template engine for outgoing messages using Jinja2 syntax.
//!
//! Templates are compiled into the binary and registered once; rendering
//! takes any serializable context.

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use thiserror::Error;

/// Mail template for violation reports
pub const REPORT_MAIL_TEMPLATE: &str = "mail/report.jinja";

const BUNDLED_TEMPLATES: &[(&str, &str)] = &[(
    REPORT_MAIL_TEMPLATE,
    include_str!("../../../templates/mail/report.jinja"),
)];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to load template '{0}': {1}")]
    LoadError(String, String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Registered set of templates
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Engine with every template that ships with the binary
    pub fn bundled() -> Result<Self, TemplateError> {
        Self::from_sources(BUNDLED_TEMPLATES)
    }

    pub fn from_sources(sources: &[(&'static str, &'static str)]) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        // Fail on missing variables
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);

        for &(name, source) in sources {
            env.add_template(name, source)
                .map_err(|e| TemplateError::LoadError(name.to_string(), e.to_string()))?;
            tracing::debug!("Loaded template: {}", name);
        }

        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, template_name: &str, ctx: S) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(template_name)
            .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

        template
            .render(ctx)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_render_registered_template() {
        let engine = TemplateEngine::from_sources(&[("greeting", "Hallo {{ name }}!")]).unwrap();
        let rendered = engine.render("greeting", context! { name => "Erika" }).unwrap();
        assert_eq!(rendered, "Hallo Erika!");
    }

    #[test]
    fn test_unknown_template() {
        let engine = TemplateEngine::from_sources(&[]).unwrap();
        assert!(matches!(
            engine.render("missing", context! {}),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_undefined_variable_fails() {
        let engine = TemplateEngine::from_sources(&[("greeting", "Hallo {{ name }}!")]).unwrap();
        assert!(matches!(
            engine.render("greeting", context! {}),
            Err(TemplateError::RenderError(_))
        ));
    }

    #[test]
    fn test_invalid_template_source() {
        assert!(matches!(
            TemplateEngine::from_sources(&[("broken", "{% if %}")]),
            Err(TemplateError::LoadError(..))
        ));
    }

    #[test]
    fn test_bundled_templates_load() {
        assert!(TemplateEngine::bundled().is_ok());
    }
}
