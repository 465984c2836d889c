//! Integration tests for the wizard page-transition protocol.
//!
//! These tests drive a `WizardController` end to end:
//! 1. The form is loaded and the first page built
//! 2. Navigation validates, runs hooks, commits and redraws
//! 3. Events are observed on the in-memory bus
//! 4. Buttons and breadcrumbs are wired through the recording binder
//!
//! Uses in-memory adapters so no rendering surface is needed.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use form_wizard::adapters::{
    HookPoint, HtmlTemplateRenderer, InMemoryEventBus, RecordingBinder, ScriptedHooks,
    StaticFormLoader,
};
use form_wizard::application::{WizardController, WizardDeps, WizardError};
use form_wizard::config::WizardOptions;
use form_wizard::domain::component::ValidationRule;
use form_wizard::domain::foundation::{DomainError, ErrorCode, WizardStatus};
use form_wizard::domain::schema::{FormSchema, NodeType, SchemaNode};
use form_wizard::domain::wizard::{WizardAction, WizardButton};
use form_wizard::ports::{ElementHandle, RenderMode, TemplateRenderer};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Harness {
    wizard: WizardController,
    bus: Arc<InMemoryEventBus>,
    binder: Arc<RecordingBinder>,
    hooks: Arc<ScriptedHooks>,
}

fn harness(options: WizardOptions, hooks: ScriptedHooks) -> Harness {
    let bus = Arc::new(InMemoryEventBus::new());
    let binder = Arc::new(RecordingBinder::new());
    let hooks = Arc::new(hooks);
    let deps = WizardDeps {
        renderer: Arc::new(HtmlTemplateRenderer::new()),
        binder: binder.clone(),
        publisher: bus.clone(),
        hooks: hooks.clone(),
    };
    Harness {
        wizard: WizardController::new(deps, options),
        bus,
        binder,
        hooks,
    }
}

async fn ready(schema: FormSchema) -> Harness {
    ready_with(schema, WizardOptions::default(), ScriptedHooks::new()).await
}

async fn ready_with(schema: FormSchema, options: WizardOptions, hooks: ScriptedHooks) -> Harness {
    let mut h = harness(options, hooks);
    h.wizard.set_form(schema).await.unwrap();
    h
}

fn text(key: &str) -> SchemaNode {
    SchemaNode::new(NodeType::Textfield, key)
}

/// Three pages `a`, `b`, `c` with one optional field each.
fn three_pages() -> FormSchema {
    FormSchema::new(vec![
        SchemaNode::panel("a", vec![text("first")]),
        SchemaNode::panel("b", vec![text("second")]),
        SchemaNode::panel("c", vec![text("third")]),
    ])
}

/// Two pages; only the second has a required field.
fn required_on_second_page() -> FormSchema {
    FormSchema::new(vec![
        SchemaNode::panel("account", vec![text("nickname")]),
        SchemaNode::panel("contact", vec![SchemaNode::new(NodeType::Email, "email").required()]),
    ])
}

/// HTML renderer that can be switched into failing.
#[derive(Default)]
struct SwitchableRenderer {
    inner: HtmlTemplateRenderer,
    failing: AtomicBool,
}

impl SwitchableRenderer {
    fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl TemplateRenderer for SwitchableRenderer {
    async fn render_template(
        &self,
        name: &str,
        context: &Value,
        mode: RenderMode,
    ) -> Result<String, DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::new(ErrorCode::RenderFailed, "template store offline"));
        }
        self.inner.render_template(name, context, mode).await
    }
}

fn page_of(event: &form_wizard::domain::foundation::EventEnvelope) -> u64 {
    event.payload["page"].as_u64().unwrap()
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn operations_before_form_are_not_ready() {
    let mut h = harness(WizardOptions::default(), ScriptedHooks::new());

    assert_eq!(h.wizard.status(), WizardStatus::Initializing);
    assert!(matches!(h.wizard.next_page().await, Err(WizardError::NotReady(_))));
    assert!(matches!(h.wizard.render().await, Err(WizardError::NotReady(_))));
    assert!(matches!(h.wizard.set_page(1).await, Err(WizardError::NotReady(_))));
}

#[tokio::test]
async fn load_builds_first_page() {
    let loader = StaticFormLoader::from_json(json!({
        "display": "wizard",
        "components": [
            {"type": "panel", "key": "intro", "title": "Intro", "components": [{"type": "textfield", "key": "name"}]},
            {"type": "panel", "key": "details", "title": "Details"}
        ]
    }))
    .unwrap();
    let mut h = harness(WizardOptions::default(), ScriptedHooks::new());

    h.wizard.load(&loader).await.unwrap();

    assert_eq!(h.wizard.status(), WizardStatus::Ready);
    assert_eq!(h.wizard.page(), 0);
    assert_eq!(h.wizard.state().page_count(), 2);
    assert_eq!(h.wizard.state().panels().len(), h.wizard.state().pages().len());
    assert!(h.wizard.state().seen_pages().contains(&0));
}

#[tokio::test]
async fn failing_loader_is_a_collaborator_error() {
    let loader =
        StaticFormLoader::failing(DomainError::new(ErrorCode::SchemaLoadFailed, "offline"));
    let mut h = harness(WizardOptions::default(), ScriptedHooks::new());

    let err = h.wizard.load(&loader).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::SchemaLoadFailed);
    assert_eq!(h.wizard.status(), WizardStatus::Initializing);
}

#[tokio::test]
async fn schema_defaults_fill_the_submission() {
    let mut plan = SchemaNode::new(NodeType::Select, "plan");
    plan.default_value = Some(json!("basic"));
    let h = ready(FormSchema::new(vec![SchemaNode::panel("a", vec![plan])])).await;

    assert_eq!(h.wizard.submission().get("plan"), Some(&json!("basic")));
}

// =============================================================================
// Forward and backward navigation
// =============================================================================

#[tokio::test]
async fn next_page_advances_and_emits() {
    let mut h = ready(three_pages()).await;

    h.wizard.next_page().await.unwrap();

    assert_eq!(h.wizard.page(), 1);
    assert!(h.wizard.state().seen_pages().contains(&1));
    let event = h.bus.last_of_type("nextPage").unwrap();
    assert_eq!(page_of(&event), 1);
    assert_eq!(event.aggregate_id, h.wizard.id().to_string());
}

#[tokio::test]
async fn invalid_page_never_advances() {
    let schema = FormSchema::new(vec![
        SchemaNode::panel("a", vec![text("name").required()]),
        SchemaNode::panel("b", vec![]),
    ]);
    let mut h = ready(schema).await;

    let err = h.wizard.next_page().await.unwrap_err();

    assert_eq!(h.wizard.page(), 0);
    assert_eq!(err.field_errors().len(), 1);
    assert_eq!(err.field_errors()[0].key, "name");
    assert_eq!(err.field_errors()[0].rule, ValidationRule::Required);
    assert!(!h.bus.has_event("nextPage"));
    assert_eq!(h.hooks.calls_to(HookPoint::BeforeNext), 0);

    h.wizard.set_value("name", json!("Ada")).await.unwrap();
    h.wizard.next_page().await.unwrap();
    assert_eq!(h.wizard.page(), 1);
}

#[tokio::test]
async fn next_page_resolves_panel_key() {
    let schema = FormSchema::new(vec![
        SchemaNode::panel("intro", vec![]),
        SchemaNode::panel("details", vec![]).with_next_page(json!("intro")),
    ]);
    let mut h = ready(schema).await;
    h.wizard.set_page(1).await.unwrap();

    h.wizard.next_page().await.unwrap();

    assert_eq!(h.wizard.page(), 0);
}

#[tokio::test]
async fn current_page_only_until_submit() {
    let mut h = ready(required_on_second_page()).await;

    // Page 0 is valid on its own.
    h.wizard.next_page().await.unwrap();
    assert_eq!(h.wizard.page(), 1);

    let err = h.wizard.submit().await.unwrap_err();
    let errors = err.field_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].key, "email");
    assert_eq!(errors[0].page, Some(1));
    assert_eq!(h.wizard.status(), WizardStatus::Ready);
    assert_eq!(h.wizard.page(), 1);
}

#[tokio::test]
async fn prev_page_clamps_at_first_page() {
    let mut h = ready(three_pages()).await;
    h.wizard.set_page(2).await.unwrap();

    h.wizard.prev_page().await.unwrap();
    assert_eq!(h.wizard.page(), 1);
    h.wizard.prev_page().await.unwrap();
    h.wizard.prev_page().await.unwrap();

    assert_eq!(h.wizard.page(), 0);
    let pages: Vec<u64> = h.bus.events_of_type("prevPage").iter().map(page_of).collect();
    assert_eq!(pages, vec![1, 0, 0]);
    assert_eq!(h.hooks.calls_to(HookPoint::BeforePrev), 3);
}

#[tokio::test]
async fn set_page_out_of_range_is_rejected() {
    let mut h = ready(three_pages()).await;

    let err = h.wizard.set_page(5).await.unwrap_err();

    assert_eq!(
        err,
        WizardError::PageNotFound {
            requested: 5,
            page_count: 3
        }
    );
    assert_eq!(h.wizard.page(), 0);
}

#[tokio::test]
async fn set_page_to_active_page_does_nothing() {
    let mut h = ready(three_pages()).await;
    h.wizard.set_page(1).await.unwrap();
    let builds = h.wizard.state().build_count();

    h.wizard.set_page(1).await.unwrap();
    h.wizard.set_page(1).await.unwrap();

    assert_eq!(h.wizard.state().build_count(), builds);
    assert_eq!(h.wizard.page(), 1);
}

#[tokio::test]
async fn set_page_commit_rebuilds_the_tree() {
    let mut h = ready(three_pages()).await;
    let builds = h.wizard.state().build_count();

    h.wizard.set_page(2).await.unwrap();

    assert_eq!(h.wizard.state().build_count(), builds + 1);
    assert_eq!(h.wizard.state().current_next_page(), Some(3));
}

#[tokio::test]
async fn flattened_mode_only_redraws() {
    let options = WizardOptions {
        full: true,
        ..WizardOptions::default()
    };
    let mut h = ready_with(three_pages(), options, ScriptedHooks::new()).await;

    h.wizard.set_page(7).await.unwrap();

    assert_eq!(h.wizard.page(), 0);
}

#[tokio::test]
async fn keyless_panels_are_told_apart() {
    let mut h = ready(FormSchema::new(vec![
        SchemaNode::panel("", vec![text("first")]),
        SchemaNode::panel("", vec![text("second")]),
        SchemaNode::panel("", vec![text("third")]),
    ]))
    .await;

    h.wizard.next_page().await.unwrap();
    assert_eq!(h.wizard.page(), 1);
    h.wizard.next_page().await.unwrap();
    assert_eq!(h.wizard.page(), 2);

    h.wizard.set_page(0).await.unwrap();
    h.wizard.set_page(2).await.unwrap();
    assert_eq!(h.wizard.page(), 2);
    assert_eq!(h.wizard.state().current_page()[0].key(), "third");
}

#[tokio::test]
async fn duplicate_panel_keys_keep_the_committed_page() {
    let mut h = ready(FormSchema::new(vec![
        SchemaNode::panel("step", vec![text("first")]),
        SchemaNode::panel("other", vec![text("second")]),
        SchemaNode::panel("step", vec![text("third")]),
    ]))
    .await;

    h.wizard.set_page(2).await.unwrap();

    assert_eq!(h.wizard.page(), 2);
    assert_eq!(h.wizard.state().current_page()[0].key(), "third");
    let seen: Vec<usize> = h.wizard.state().seen_pages().iter().copied().collect();
    assert_eq!(seen, vec![0, 2]);
}

// =============================================================================
// Hooks
// =============================================================================

#[tokio::test]
async fn rejected_before_next_keeps_the_page() {
    let hooks = ScriptedHooks::new().reject(HookPoint::BeforeNext, "not yet");
    let mut h = ready_with(three_pages(), WizardOptions::default(), hooks).await;

    let err = h.wizard.next_page().await.unwrap_err();

    assert!(matches!(&err, WizardError::HookRejected(e) if e.message == "not yet"));
    assert_eq!(h.wizard.page(), 0);
    assert!(!h.bus.has_event("nextPage"));
    assert_eq!(h.hooks.calls_to(HookPoint::ComponentBeforePage), 0);
}

#[tokio::test]
async fn component_hooks_run_for_live_components() {
    let hooks = ScriptedHooks::new().reject(HookPoint::ComponentBeforePage, "busy");
    let schema = FormSchema::new(vec![
        SchemaNode::panel("a", vec![text("one"), text("two")]),
        SchemaNode::panel("b", vec![]),
    ]);
    let mut h = ready_with(schema, WizardOptions::default(), hooks).await;

    assert!(matches!(h.wizard.next_page().await, Err(WizardError::HookRejected(_))));
    assert_eq!(h.wizard.page(), 0);
    assert_eq!(h.hooks.calls_to(HookPoint::BeforeNext), 1);

    h.hooks.set_rejection(HookPoint::ComponentBeforePage, None);
    h.wizard.next_page().await.unwrap();
    assert_eq!(h.wizard.page(), 1);
}

#[tokio::test]
async fn read_only_skips_validation_and_hooks() {
    let schema = FormSchema::new(vec![
        SchemaNode::panel("a", vec![text("name").required()]),
        SchemaNode::panel("b", vec![]),
    ]);
    let mut h = ready_with(schema, WizardOptions::read_only(), ScriptedHooks::new()).await;

    h.wizard.next_page().await.unwrap();

    assert_eq!(h.wizard.page(), 1);
    assert_eq!(h.hooks.calls_to(HookPoint::BeforeNext), 0);
    assert!(h.wizard.state().is_disabled());
    assert!(matches!(h.wizard.submit().await, Err(WizardError::NotReady(_))));
}

// =============================================================================
// Submit and cancel
// =============================================================================

#[tokio::test]
async fn submit_runs_hooks_and_completes() {
    let mut h = ready(required_on_second_page()).await;
    h.wizard.set_value("email", json!("ada@example.com")).await.unwrap();

    let submission = h.wizard.submit().await.unwrap();

    assert_eq!(submission.get("email"), Some(&json!("ada@example.com")));
    assert_eq!(h.wizard.status(), WizardStatus::Submitted);
    assert_eq!(h.hooks.calls_to(HookPoint::BeforeSubmit), 1);
    assert_eq!(h.hooks.calls_to(HookPoint::ComponentBeforeSubmit), 2);
    assert!(h.bus.has_event("submit"));

    // Editing after submit reopens the wizard.
    h.wizard.set_value("nickname", json!("ada")).await.unwrap();
    assert_eq!(h.wizard.status(), WizardStatus::Ready);
}

#[tokio::test]
async fn rejected_submit_hook_returns_to_ready() {
    let hooks = ScriptedHooks::new().reject(HookPoint::BeforeSubmit, "payment pending");
    let mut h = ready_with(three_pages(), WizardOptions::default(), hooks).await;

    let err = h.wizard.submit().await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::HookRejected);
    assert_eq!(h.wizard.status(), WizardStatus::Ready);
    assert!(!h.bus.has_event("submit"));
}

#[tokio::test]
async fn confirmed_cancel_resets_values_and_page() {
    let mut plan = SchemaNode::new(NodeType::Select, "plan");
    plan.default_value = Some(json!("basic"));
    let schema = FormSchema::new(vec![
        SchemaNode::panel("a", vec![plan]),
        SchemaNode::panel("b", vec![text("note")]),
    ]);
    let mut h = ready(schema).await;
    h.wizard.set_value("plan", json!("pro")).await.unwrap();
    h.wizard.set_value("note", json!("hello")).await.unwrap();
    h.wizard.set_page(1).await.unwrap();

    h.wizard.cancel().await.unwrap();

    assert_eq!(h.wizard.page(), 0);
    assert_eq!(h.wizard.submission().get("plan"), Some(&json!("basic")));
    assert_eq!(h.wizard.submission().get("note"), None);
    assert!(h.bus.has_event("cancel"));
}

#[tokio::test]
async fn declined_cancel_keeps_everything() {
    let mut h = ready_with(three_pages(), WizardOptions::default(), ScriptedHooks::new().decline_cancel()).await;
    h.wizard.set_value("first", json!("kept")).await.unwrap();
    h.wizard.set_page(2).await.unwrap();

    h.wizard.cancel().await.unwrap();

    assert_eq!(h.wizard.page(), 2);
    assert_eq!(h.wizard.submission().get("first"), Some(&json!("kept")));
    assert!(!h.bus.has_event("cancel"));
}

// =============================================================================
// Render, attach and dispatch
// =============================================================================

#[tokio::test]
async fn render_shows_active_page_and_global_components() {
    let mut token = SchemaNode::new(NodeType::Hidden, "token");
    token.default_value = Some(json!("t-1"));
    let schema = FormSchema::new(vec![
        SchemaNode::panel("a", vec![text("first")]),
        token,
        SchemaNode::panel("b", vec![text("second")]),
    ]);
    let mut h = ready(schema).await;

    let html = h.wizard.render().await.unwrap();

    assert!(html.contains(r#"name="first""#));
    assert!(!html.contains(r#"name="second""#));
    assert!(html.contains(r#"name="token" value="t-1""#));
    assert!(html.contains(r#"id="a-a""#));
    assert!(h.bus.has_event("render"));

    h.wizard.set_page(1).await.unwrap();
    let html = h.wizard.render().await.unwrap();
    assert!(html.contains(r#"name="second""#));
    assert!(html.contains(r#"name="token""#));
}

#[tokio::test]
async fn attach_wires_buttons_and_breadcrumbs() {
    let mut h = ready(three_pages()).await;
    let root = ElementHandle::new("form");

    h.wizard.attach(root.clone()).await.unwrap();

    let key = h.wizard.wizard_key();
    let next = ElementHandle::new(format!("form/{}-next", key));
    assert_eq!(h.binder.action_for(&next, "click"), Some(WizardAction::Next));
    assert_eq!(
        h.binder.action_for(&ElementHandle::new(format!("form/{}-link/2", key)), "click"),
        Some(WizardAction::GoToPage(2))
    );
    // The active page's breadcrumb is not clickable.
    assert_eq!(
        h.binder.action_for(&ElementHandle::new(format!("form/{}-link/0", key)), "click"),
        None
    );
    // No previous button on the first page.
    assert!(h.binder.target_of(WizardAction::Previous).is_none());
    assert!(h.wizard.state().current_page().iter().all(|c| c.is_attached()));
    assert!(h.bus.has_event("attach"));
    assert!(h.binder.content_of(&root).is_some());
}

#[tokio::test]
async fn navigation_redraws_attached_surface() {
    let mut h = ready(three_pages()).await;
    h.wizard.attach(ElementHandle::new("form")).await.unwrap();
    h.bus.clear();

    h.wizard.next_page().await.unwrap();

    assert_eq!(h.bus.event_types(), vec!["render", "attach", "nextPage"]);
    assert!(h.binder.target_of(WizardAction::Previous).is_some());
    let markup = h.binder.content_of(&ElementHandle::new("form")).unwrap();
    assert!(markup.contains(r#"name="second""#));
}

#[tokio::test]
async fn failed_redraw_leaves_the_page_unchanged() {
    let bus = Arc::new(InMemoryEventBus::new());
    let renderer = Arc::new(SwitchableRenderer::default());
    let deps = WizardDeps {
        renderer: renderer.clone(),
        binder: Arc::new(RecordingBinder::new()),
        publisher: bus.clone(),
        hooks: Arc::new(ScriptedHooks::new()),
    };
    let mut wizard = WizardController::new(deps, WizardOptions::default());
    wizard.set_form(three_pages()).await.unwrap();
    wizard.attach(ElementHandle::new("form")).await.unwrap();
    bus.clear();

    renderer.fail(true);
    let err = wizard.set_page(1).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::RenderFailed);
    assert_eq!(wizard.page(), 0);
    assert_eq!(wizard.state().seen_pages().iter().copied().collect::<Vec<_>>(), vec![0]);
    assert_eq!(wizard.state().current_next_page(), Some(1));
    assert_eq!(wizard.state().current_page()[0].key(), "first");

    assert!(wizard.next_page().await.is_err());
    assert_eq!(wizard.page(), 0);
    assert!(!bus.has_event("nextPage"));

    renderer.fail(false);
    wizard.set_page(1).await.unwrap();
    assert_eq!(wizard.page(), 1);
}

#[tokio::test]
async fn breadcrumb_click_emits_then_moves() {
    let mut h = ready(three_pages()).await;
    h.wizard.attach(ElementHandle::new("form")).await.unwrap();
    let link = ElementHandle::new(format!("form/{}-link/2", h.wizard.wizard_key()));

    let action = h.binder.action_for(&link, "click").unwrap();
    h.wizard.dispatch(action).await.unwrap();

    assert_eq!(h.wizard.page(), 2);
    let clicked = h.bus.last_of_type("wizardNavigationClicked").unwrap();
    assert_eq!(clicked.payload["panel_key"], Value::from("c"));
    let types = h.bus.event_types();
    let clicked_at = types.iter().position(|t| t == "wizardNavigationClicked").unwrap();
    let render_at = types.iter().rposition(|t| t == "render").unwrap();
    assert!(clicked_at < render_at);
}

#[tokio::test]
async fn invalid_next_renders_inline_errors() {
    let schema = FormSchema::new(vec![
        SchemaNode::panel("a", vec![text("name").required()]),
        SchemaNode::panel("b", vec![]),
    ]);
    let mut h = ready(schema).await;
    h.wizard.attach(ElementHandle::new("form")).await.unwrap();

    assert!(h.wizard.next_page().await.is_err());

    let markup = h.binder.content_of(&ElementHandle::new("form")).unwrap();
    assert!(markup.contains("name is required"));
}

#[tokio::test]
async fn destroy_releases_tree_and_listeners() {
    let mut h = ready(three_pages()).await;
    h.wizard.attach(ElementHandle::new("form")).await.unwrap();

    h.wizard.destroy().await.unwrap();
    h.wizard.destroy().await.unwrap();

    assert!(h.binder.listeners().is_empty());
    assert_eq!(h.wizard.state().page_count(), 0);
    assert!(h.wizard.element().is_none());
}

// =============================================================================
// Derived views
// =============================================================================

#[tokio::test]
async fn buttons_follow_the_page() {
    let mut h = ready(three_pages()).await;
    assert_eq!(
        h.wizard.buttons().shown(),
        vec![WizardButton::Cancel, WizardButton::Next]
    );

    h.wizard.set_page(2).await.unwrap();
    assert_eq!(
        h.wizard.buttons().shown(),
        vec![WizardButton::Cancel, WizardButton::Previous, WizardButton::Submit]
    );
}

#[tokio::test]
async fn explicit_end_makes_submit_available_early() {
    let schema = FormSchema::new(vec![
        SchemaNode::panel("a", vec![]).with_next_page(Value::Null),
        SchemaNode::panel("b", vec![]),
    ]);
    let mut h = ready(schema).await;

    let buttons = h.wizard.buttons();
    assert!(buttons.submit);
    assert!(!buttons.next);
}

#[tokio::test]
async fn errors_on_last_page_cover_every_page() {
    let schema = FormSchema::new(vec![
        SchemaNode::panel("a", vec![text("first").required()]),
        SchemaNode::panel("b", vec![text("second").required()]),
    ]);
    let mut h = ready(schema).await;
    assert!(h.wizard.errors().is_empty());

    h.wizard.set_page(1).await.unwrap();
    let keys: Vec<String> = h.wizard.errors().into_iter().map(|e| e.key).collect();
    assert_eq!(keys, vec!["first", "second"]);
}

#[tokio::test]
async fn page_ids_and_clickability() {
    let mut intro = SchemaNode::panel("intro", vec![]);
    intro.title = Some("Welcome".to_string());
    let mut locked = SchemaNode::panel("locked", vec![]);
    locked.breadcrumb_clickable = Some(false);
    let h = ready(FormSchema::new(vec![intro, locked, SchemaNode::panel("last", vec![])])).await;

    assert_eq!(h.wizard.page_id(0).as_deref(), Some("intro-Welcome"));
    assert_eq!(h.wizard.page_id(9), None);
    assert!(!h.wizard.is_clickable(0));
    assert!(!h.wizard.is_clickable(1));
    assert!(h.wizard.is_clickable(2));
}
