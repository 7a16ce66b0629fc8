use crate::{error::Result, renderer::interface::TemplateRenderer};
use minijinja::Environment;
use serde_json::json;

/// MiniJinja-based rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
    /// Default context that will be merged with any provided context
    default_context: serde_json::Value,
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer instance with default environment.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        let default_context = json!({
            "platform": {
                "os": std::env::consts::OS,
                "family": std::env::consts::FAMILY,
            }
        });
        Self { env, default_context }
    }

    /// Merges the provided context over the default one.
    fn merged_context(&self, context: &serde_json::Value) -> serde_json::Value {
        match (self.default_context.as_object(), context.as_object()) {
            (Some(default_obj), Some(context_obj)) => {
                let mut result = default_obj.clone();
                for (key, value) in context_obj {
                    result.insert(key.clone(), value.clone());
                }
                json!(result)
            }
            // If either isn't an object, just use the provided context
            _ => context.clone(),
        }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String> {
        let name = template_name.unwrap_or("temp");
        Ok(self.env.render_named_str(name, template, self.merged_context(context))?)
    }
}
