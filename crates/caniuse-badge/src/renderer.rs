//! Handlebars rendering of badge templates.

use handlebars::Handlebars;
use serde_json::Value;

use crate::templates::TemplatesFile;
use crate::BadgeError;

/// Compiled badge templates
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Compile every template and partial of `templates`.
    pub fn new(templates: &TemplatesFile) -> Result<Self, BadgeError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);

        for (name, source) in &templates.partials {
            handlebars
                .register_partial(name, source.as_str())
                .map_err(|e| BadgeError::Template(format!("partial {}: {}", name, e)))?;
        }

        for (name, template) in &templates.templates {
            handlebars
                .register_template_string(name, &template.template)
                .map_err(|e| BadgeError::Template(format!("template {}: {}", name, e)))?;
        }

        Ok(Self { handlebars })
    }

    /// Render a named template with data
    pub fn render(&self, template_name: &str, data: &Value) -> Result<String, BadgeError> {
        if !self.handlebars.has_template(template_name) {
            return Err(BadgeError::MissingTemplate(template_name.to_string()));
        }

        self.handlebars
            .render(template_name, data)
            .map_err(|e| BadgeError::Render(e.to_string()))
    }
}
