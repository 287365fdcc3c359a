//! Simple `{{ name }}` placeholder substitution.

use bundlegen_core::{
    application::ports::TemplateRenderer, domain::RenderContext, error::BundlegenResult,
};

/// Renderer performing exact `{{ name }}` substitution.
///
/// Unknown placeholders are left untouched: skeleton files may contain
/// template syntax of their own (Twig also uses `{{ }}`), and only the
/// context's variables belong to us.
pub struct PlaceholderRenderer;

impl PlaceholderRenderer {
    /// Create a new placeholder renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlaceholderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, template: &str, ctx: &RenderContext) -> BundlegenResult<String> {
        let mut out = template.to_string();
        for (name, value) in ctx.vars() {
            out = out.replace(&format!("{{{{ {name} }}}}"), value);
        }
        Ok(out)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bundlegen_core::domain::{BundleName, Namespace};

    fn ctx() -> RenderContext {
        let ns: Namespace = "Acme\\DemoBundle".parse().unwrap();
        let bundle = BundleName::derived_from(&ns);
        RenderContext::new(&ns, &bundle)
    }

    #[test]
    fn substitutes_both_variables() {
        let out = PlaceholderRenderer::new()
            .render("namespace {{ namespace }}; class {{ bundle }} {}", &ctx())
            .unwrap();
        assert_eq!(out, "namespace Acme\\DemoBundle; class AcmeDemoBundle {}");
    }

    #[test]
    fn substitutes_repeated_occurrences() {
        let out = PlaceholderRenderer::new()
            .render("{{ bundle }}/{{ bundle }}", &ctx())
            .unwrap();
        assert_eq!(out, "AcmeDemoBundle/AcmeDemoBundle");
    }

    #[test]
    fn unknown_placeholders_are_left_alone() {
        let out = PlaceholderRenderer::new()
            .render("{{ app.user }} and {{ bundle }}", &ctx())
            .unwrap();
        assert_eq!(out, "{{ app.user }} and AcmeDemoBundle");
    }

    #[test]
    fn spacing_must_match_exactly() {
        let out = PlaceholderRenderer::new()
            .render("{{bundle}}", &ctx())
            .unwrap();
        assert_eq!(out, "{{bundle}}");
    }
}
