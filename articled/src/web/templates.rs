//! HTML templates, embedded in the binary and rendered with minijinja.
//!
//! Names ending in `.html` are auto-escaped.

use minijinja::Environment;
use rust_embed::RustEmbed;
use serde::Serialize;

#[derive(RustEmbed)]
#[folder = "templates/"]
struct TemplateFiles;

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_loader(|name| {
            Ok(TemplateFiles::get(name).map(|file| String::from_utf8_lossy(&file.data).into_owned()))
        });
        Self { env }
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_every_page_template_loads() {
        let templates = Templates::new();

        for name in ["list.html", "detail.html", "form.html"] {
            assert!(templates.env.get_template(name).is_ok(), "{name} should load");
        }
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        assert!(Templates::new().render("missing.html", context! {}).is_err());
    }

    #[test]
    fn test_output_is_escaped() {
        let html = Templates::new()
            .render(
                "list.html",
                context! {
                    articles => vec![context! {
                        id => 1,
                        title => "<script>alert(1)</script>",
                        category => "c",
                        status => "s",
                        createdAt => "2025/06/01 09:30",
                    }],
                },
            )
            .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
