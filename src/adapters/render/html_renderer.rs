//! Deterministic HTML templates for the wizard and its components.
//!
//! Every interactive element carries a `ref` attribute so the element binder
//! can find it again after the markup is placed on the surface.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::condition::logic::to_text as text;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{RenderMode, TemplateRenderer};

/// Built-in template set producing plain HTML.
#[derive(Debug, Clone, Default)]
pub struct HtmlTemplateRenderer;

impl HtmlTemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render(name: &str, ctx: &Value) -> Option<String> {
        let html = match name {
            "wizard" => Self::wizard(ctx),
            "input" => Self::field(ctx, |key, value, disabled| {
                format!(
                    r#"<input ref="input" name="{}" value="{}"{}>"#,
                    key, value, disabled
                )
            }),
            "textarea" => Self::field(ctx, |key, value, disabled| {
                format!(r#"<textarea ref="input" name="{}"{}>{}</textarea>"#, key, disabled, value)
            }),
            "checkbox" => {
                let checked = if ctx["value"] == Value::Bool(true) { " checked" } else { "" };
                Self::field(ctx, |key, _, disabled| {
                    format!(
                        r#"<input ref="input" type="checkbox" name="{}"{}{}>"#,
                        key, checked, disabled
                    )
                })
            }
            "select" => Self::field(ctx, |key, value, disabled| {
                format!(
                    r#"<select ref="input" name="{}" data-value="{}"{}></select>"#,
                    key, value, disabled
                )
            }),
            "hidden" => format!(
                r#"<input type="hidden" name="{}" value="{}">"#,
                escape(&text(&ctx["key"])),
                escape(&text(&ctx["value"]))
            ),
            "html" => format!(
                r#"<div class="formio-component-content" data-key="{}">{}</div>"#,
                escape(&text(&ctx["key"])),
                escape(&text(&ctx["label"]))
            ),
            "panel" | "well" | "fieldset" => format!(
                r#"<div class="formio-{}" data-key="{}"><div ref="nested-{}">{}</div></div>"#,
                name,
                escape(&text(&ctx["key"])),
                escape(&text(&ctx["key"])),
                text(&ctx["children"])
            ),
            "unknown" => format!(
                r#"<div class="formio-component-unknown" data-key="{}"></div>"#,
                escape(&text(&ctx["key"]))
            ),
            _ => return None,
        };
        Some(html)
    }

    fn field(ctx: &Value, control: impl Fn(&str, &str, &str) -> String) -> String {
        let key = escape(&text(&ctx["key"]));
        let label = escape(&text(&ctx["label"]));
        let value = escape(&text(&ctx["value"]));
        let disabled = if ctx["disabled"] == Value::Bool(true) { " disabled" } else { "" };
        let hidden = if ctx["hidden"] == Value::Bool(true) { " hidden" } else { "" };

        let mut html = format!(r#"<div class="formio-component" data-key="{}"{}>"#, key, hidden);
        if !label.is_empty() {
            html.push_str(&format!("<label>{}</label>", label));
        }
        html.push_str(&control(&key, &value, disabled));
        if let Some(errors) = ctx["errors"].as_array() {
            for error in errors {
                html.push_str(&format!(r#"<div class="error">{}</div>"#, escape(&text(error))));
            }
        }
        html.push_str("</div>");
        html
    }

    fn wizard(ctx: &Value) -> String {
        let key = escape(&text(&ctx["wizardKey"]));
        let current = ctx["currentPage"].as_u64().unwrap_or(0);
        let mut html = String::from(r#"<div class="formio-wizard">"#);

        html.push_str(r#"<nav class="wizard-header"><ul>"#);
        for (index, panel) in ctx["panels"].as_array().into_iter().flatten().enumerate() {
            let active = if index as u64 == current { " active" } else { "" };
            html.push_str(&format!(
                r#"<li class="page-link{}" id="{}"><a ref="{}-link">{}</a></li>"#,
                active,
                escape(&text(&panel["id"])),
                key,
                escape(&text(&panel["title"]))
            ));
        }
        html.push_str("</ul></nav>");

        html.push_str(&format!(r#"<div class="wizard-page" ref="{}">"#, key));
        html.push_str(&text(&ctx["components"]));
        html.push_str("</div>");

        html.push_str(r#"<nav class="wizard-nav">"#);
        for button in ctx["buttons"].as_array().into_iter().flatten() {
            let name = escape(&text(button));
            html.push_str(&format!(r#"<button ref="{}-{}">{}</button>"#, key, name, name));
        }
        html.push_str("</nav></div>");
        html
    }
}

#[async_trait]
impl TemplateRenderer for HtmlTemplateRenderer {
    async fn render_template(
        &self,
        name: &str,
        context: &Value,
        mode: RenderMode,
    ) -> Result<String, DomainError> {
        let html = Self::render(name, context).ok_or_else(|| {
            DomainError::new(ErrorCode::RenderFailed, format!("Unknown template: {}", name))
                .with_detail("template", name)
        })?;
        Ok(match mode {
            RenderMode::Form => html,
            RenderMode::Builder => format!(r#"<div class="builder-component">{}</div>"#, html),
        })
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
