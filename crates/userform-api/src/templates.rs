// HTML template rendering
// Decision: Templates are loaded from disk lazily, so a missing file fails the
// request that needs it instead of the whole process

use std::path::Path;

use minijinja::{context, Environment, ErrorKind};

/// Template shown at `GET /`
pub const FORM_TEMPLATE: &str = "form.html";

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template not found: {0}")]
    NotFound(String),

    #[error("failed to render template {name}: {message}")]
    Render { name: String, message: String },
}

/// Renders HTML pages from a template directory
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(dir.as_ref().to_path_buf()));
        Self { env }
    }

    /// Render a template that takes no parameters
    pub fn render(&self, name: &str) -> Result<String, TemplateError> {
        let template = self.env.get_template(name).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => TemplateError::NotFound(name.to_string()),
            _ => TemplateError::Render {
                name: name.to_string(),
                message: e.to_string(),
            },
        })?;

        template
            .render(context!())
            .map_err(|e| TemplateError::Render {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}
