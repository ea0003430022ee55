use tera::Tera;

/// Tera-backed template engine shared by prompts and HTML views.
pub struct TeraEngine {
    tera: Tera,
}

impl TeraEngine {
    /// Plain-text engine: nothing is escaped, whatever the template name.
    pub fn new() -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        Self { tera }
    }

    /// HTML engine: templates whose name ends in `.html` are escaped.
    pub fn html() -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        Self { tera }
    }

    /// Register a template from a string, replacing any previous one.
    pub fn add_template(&mut self, name: &str, content: &str) -> anyhow::Result<()> {
        self.tera.add_raw_template(name, content)?;
        Ok(())
    }

    /// Register several templates at once so they may extend each other.
    pub fn add_templates(&mut self, templates: &[(&str, &str)]) -> anyhow::Result<()> {
        self.tera.add_raw_templates(templates.iter().copied())?;
        Ok(())
    }

    pub fn register_filter<F: tera::Filter + 'static>(&mut self, name: &str, filter: F) {
        self.tera.register_filter(name, filter);
    }

    /// Render a named template. Undefined variables are an error.
    pub fn render(&self, template_name: &str, context: &tera::Context) -> anyhow::Result<String> {
        let rendered = self.tera.render(template_name, context)?;
        Ok(rendered)
    }
}
