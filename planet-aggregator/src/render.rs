use crate::types::{PlanetError, RenderView, Result};
use handlebars::Handlebars;
use std::path::Path;
use tracing::debug;

/// Renders the view through user supplied handlebars templates.
///
/// Templates see the serialized [`RenderView`]: `title`, `posts` and
/// `feeds`. Post bodies are HTML and should be emitted with `{{{content}}}`.
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        Self { registry }
    }

    pub fn register_template(&mut self, name: &str, source: &str) -> Result<()> {
        self.registry
            .register_template_string(name, source)
            .map_err(|e| PlanetError::Template(format!("{}: {}", name, e)))
    }

    /// Register a template file under its path.
    pub async fn register_file(&mut self, path: &Path) -> Result<String> {
        let name = path.display().to_string();
        let source = tokio::fs::read_to_string(path).await.map_err(|e| {
            PlanetError::Template(format!("reading template {}: {}", name, e))
        })?;
        self.register_template(&name, &source)?;
        debug!("Registered template {}", name);
        Ok(name)
    }

    pub fn render(&self, name: &str, view: &RenderView) -> Result<String> {
        self.registry
            .render(name, view)
            .map_err(|e| PlanetError::Template(format!("{}: {}", name, e)))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_title_from_view() {
        let mut renderer = TemplateRenderer::new();
        renderer
            .register_template("page", "<h1>{{title}}</h1>{{#each posts}}x{{/each}}")
            .unwrap();
        let view = RenderView {
            title: "Planet <Rust>".to_string(),
            posts: Vec::new(),
            feeds: Vec::new(),
        };
        assert_eq!(
            renderer.render("page", &view).unwrap(),
            "<h1>Planet &lt;Rust&gt;</h1>"
        );
    }

    #[test]
    fn reports_broken_templates() {
        let mut renderer = TemplateRenderer::new();
        let err = renderer.register_template("bad", "{{#each posts}}").unwrap_err();
        assert!(matches!(err, PlanetError::Template(_)));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let renderer = TemplateRenderer::new();
        let view = RenderView {
            title: String::new(),
            posts: Vec::new(),
            feeds: Vec::new(),
        };
        assert!(renderer.render("missing", &view).is_err());
    }
}
