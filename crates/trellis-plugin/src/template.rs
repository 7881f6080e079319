// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Template rendering helper for template extensions.

use minijinja::Environment;
use serde_json::Value;

use trellis_core::{Markup, TemplateContext, TrellisError};

/// Render the template `name` from `env` with the extension's context.
///
/// The template sees `object`, `request`, `settings` and `config`. Keys of
/// `extra` are merged over them, so an extra `config` replaces the plugin's.
/// `extra` must be a mapping when given.
pub fn render_template(
    env: &Environment<'_>,
    name: &str,
    ctx: &TemplateContext,
    extra: Option<&Value>,
) -> Result<Markup, TrellisError> {
    let mut context = ctx.to_map();
    match extra {
        None | Some(Value::Null) => {}
        Some(Value::Object(extra)) => {
            context.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Some(other) => {
            return Err(TrellisError::Contract(format!(
                "extra_context must be a mapping, got {other}"
            )));
        }
    }

    let template = env
        .get_template(name)
        .map_err(|e| TrellisError::Template(format!("template `{name}` not found: {e}")))?;
    let html = template
        .render(minijinja::Value::from_serialize(&context))
        .map_err(|e| TrellisError::Template(format!("failed to render `{name}`: {e}")))?;
    Ok(Markup::from_trusted(html))
}
