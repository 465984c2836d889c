//! WizardController - binds the page-flow engine to its collaborators.
//!
//! The controller owns the `WizardState`, the form schema and the submission.
//! Every operation follows the same protocol: check readiness, validate,
//! run the embedder's hooks, commit through the `NavigationEngine`, redraw,
//! then emit the event. A rejection at any step leaves the page unchanged.

use futures::future::{try_join_all, BoxFuture, FutureExt};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use super::error::WizardError;
use crate::config::WizardOptions;
use crate::domain::component::{ComponentInstance, ComponentTree, ComponentVariant, FieldError};
use crate::domain::foundation::{
    DomainError, SerializableDomainEvent, StateMachine, WizardId, WizardStatus,
};
use crate::domain::schema::FormSchema;
use crate::domain::submission::Submission;
use crate::domain::wizard::{
    is_clickable, page_id, AttachedEvent, ButtonVisibility, CancelledEvent,
    NavigationClickedEvent, NavigationEngine, NextPageEvent, PageModel, PageTransition,
    PrevPageEvent, RenderedEvent, SubmittedEvent, ValidityAggregator, WizardAction, WizardButton,
    WizardState,
};
use crate::ports::{
    ElementBinder, ElementHandle, EventPublisher, FormLoader, NavigationHooks, RefSpec,
    RenderMode, TemplateRenderer,
};

/// Collaborators a wizard talks to.
#[derive(Clone)]
pub struct WizardDeps {
    pub renderer: Arc<dyn TemplateRenderer>,
    pub binder: Arc<dyn ElementBinder>,
    pub publisher: Arc<dyn EventPublisher>,
    pub hooks: Arc<dyn NavigationHooks>,
}

/// A multi-page form.
pub struct WizardController {
    id: WizardId,
    deps: WizardDeps,
    options: WizardOptions,
    status: WizardStatus,
    schema: FormSchema,
    submission: Submission,
    state: WizardState,
    element: Option<ElementHandle>,
    rendered: Option<String>,
}

impl WizardController {
    pub fn new(deps: WizardDeps, options: WizardOptions) -> Self {
        Self {
            id: WizardId::new(),
            deps,
            options,
            status: WizardStatus::Initializing,
            schema: FormSchema::default(),
            submission: Submission::new(),
            state: WizardState::new(),
            element: None,
            rendered: None,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> WizardId {
        self.id
    }

    pub fn status(&self) -> WizardStatus {
        self.status
    }

    pub fn options(&self) -> &WizardOptions {
        &self.options
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn page(&self) -> usize {
        self.state.page()
    }

    pub fn element(&self) -> Option<&ElementHandle> {
        self.element.as_ref()
    }

    /// Prefix of every ref the wizard template emits.
    pub fn wizard_key(&self) -> String {
        format!("wizard-{}", self.id)
    }

    // === Form and data ===

    /// Installs a form definition and builds the first page.
    ///
    /// Navigation state starts over; the submission is kept and missing
    /// values are filled from the schema defaults.
    pub async fn set_form(&mut self, schema: FormSchema) -> Result<(), WizardError> {
        self.status = self.status.transition_to(WizardStatus::Ready)?;
        self.schema = schema;
        self.state = WizardState::new();
        self.rebuild();

        let mut submission = std::mem::take(&mut self.submission);
        for component in self.all_instances() {
            component.apply_default(&mut submission);
        }
        self.submission = submission;
        if NavigationEngine::needs_rebuild(&mut self.state, &self.schema, &self.submission.data) {
            self.rebuild();
        }
        debug!(wizard = %self.id, pages = self.state.page_count(), "form set");
        self.redraw_surface().await
    }

    /// Fetches the form from `loader` and installs it.
    pub async fn load(&mut self, loader: &dyn FormLoader) -> Result<(), WizardError> {
        let schema = loader.load_form().await.map_err(WizardError::Collaborator)?;
        self.set_form(schema).await
    }

    /// Replaces the submission data.
    pub async fn set_submission(&mut self, submission: Submission) -> Result<(), WizardError> {
        self.submission = submission;
        if self.status == WizardStatus::Initializing {
            return Ok(());
        }
        self.reopen()?;
        self.on_change().await
    }

    /// Writes one value by dot path and reacts to visibility changes.
    pub async fn set_value(&mut self, path: &str, value: Value) -> Result<(), WizardError> {
        self.ensure_ready("setValue")?;
        self.submission.set(path, value);
        self.reopen()?;
        self.on_change().await
    }

    /// Resets every component to its default value.
    pub async fn reset_value(&mut self) -> Result<(), WizardError> {
        self.ensure_ready("resetValue")?;
        self.reset_submission();
        self.reopen()?;
        self.on_change().await
    }

    // === Render and attach ===

    /// Renders the wizard: breadcrumbs, the active page (every page when
    /// flattened) and the footer buttons.
    pub async fn render(&mut self) -> Result<String, WizardError> {
        self.ensure_ready("render")?;
        let renderer = Arc::clone(&self.deps.renderer);
        let mode = self.options.render_mode();
        let disabled = self.state.is_disabled();
        let data = &self.submission.data;

        let mut components = String::new();
        for component in &self.state.global_components {
            components.push_str(&render_component(renderer.as_ref(), component, data, disabled, mode).await?);
        }
        if self.options.full {
            for handle in PageModel::get_pages(&mut self.state, true) {
                for component in handle.components() {
                    components.push_str(
                        &render_component(renderer.as_ref(), component, data, disabled, mode).await?,
                    );
                }
            }
        } else {
            for component in self.state.current_page() {
                components.push_str(
                    &render_component(renderer.as_ref(), component, data, disabled, mode).await?,
                );
            }
        }

        let buttons = self.buttons();
        let page = self.state.page();
        let panels: Vec<Value> = self
            .state
            .panels()
            .iter()
            .enumerate()
            .map(|(index, panel)| {
                let panel = match self.state.effective_panel() {
                    Some(active) if index == page => active,
                    _ => panel,
                };
                json!({"id": page_id(panel), "title": panel.display_title()})
            })
            .collect();

        let context = json!({
            "wizardKey": self.wizard_key(),
            "currentPage": page,
            "panels": panels,
            "buttons": buttons.shown().iter().map(WizardButton::as_str).collect::<Vec<_>>(),
            "components": components,
            "disabled": disabled,
        });
        let markup = renderer
            .render_template("wizard", &context, mode)
            .await
            .map_err(WizardError::Collaborator)?;

        self.rendered = Some(markup.clone());
        self.emit(RenderedEvent::new(self.id, page, &self.submission)).await?;
        Ok(markup)
    }

    /// Places the rendered wizard on `element` and wires its buttons and
    /// breadcrumbs.
    pub async fn attach(&mut self, element: ElementHandle) -> Result<(), WizardError> {
        self.ensure_ready("attach")?;
        let markup = match self.rendered.take() {
            Some(markup) => markup,
            None => self.render().await?,
        };
        let binder = Arc::clone(&self.deps.binder);
        binder
            .remove_event_listeners(&element)
            .await
            .map_err(WizardError::Collaborator)?;
        binder
            .set_content(&element, &markup)
            .await
            .map_err(WizardError::Collaborator)?;

        let key = self.wizard_key();
        let link_ref = format!("{}-link", key);
        let mut spec = vec![RefSpec::single(key.clone()), RefSpec::multiple(link_ref.clone())];
        spec.extend(
            WizardButton::ALL
                .iter()
                .map(|button| RefSpec::single(format!("{}-{}", key, button))),
        );
        let refs = binder
            .load_refs(&element, &spec)
            .await
            .map_err(WizardError::Collaborator)?;

        for button in WizardButton::ALL {
            if let Some(handle) = refs.get(&format!("{}-{}", key, button)) {
                binder
                    .add_event_listener(handle, "click", button.into())
                    .await
                    .map_err(WizardError::Collaborator)?;
            }
        }
        for (index, handle) in refs.get_all(&link_ref).iter().enumerate() {
            if is_clickable(&self.state, index, &self.options.breadcrumb_settings) {
                binder
                    .add_event_listener(handle, "click", WizardAction::GoToPage(index))
                    .await
                    .map_err(WizardError::Collaborator)?;
            }
        }

        let page = self.state.page();
        for (index, components) in self.state.pages.iter_mut().enumerate() {
            for component in components.iter_mut() {
                if self.options.full || index == page {
                    component.attach();
                } else {
                    component.detach();
                }
            }
        }
        for component in &mut self.state.global_components {
            component.attach();
        }

        self.element = Some(element);
        self.emit(AttachedEvent::new(self.id, page, &self.submission)).await
    }

    /// Runs the action bound to a clicked element.
    pub async fn dispatch(&mut self, action: WizardAction) -> Result<(), WizardError> {
        match action {
            WizardAction::Cancel => self.cancel().await,
            WizardAction::Previous => self.prev_page().await,
            WizardAction::Next => self.next_page().await,
            WizardAction::Submit => self.submit().await.map(|_| ()),
            WizardAction::GoToPage(page) => {
                self.ensure_ready("wizardNavigationClicked")?;
                let panel_key = self
                    .state
                    .panels()
                    .get(page)
                    .map(|panel| panel.key.clone())
                    .unwrap_or_default();
                self.emit(NavigationClickedEvent::new(self.id, page, panel_key, &self.submission))
                    .await?;
                self.set_page(page).await
            }
        }
    }

    // === Navigation ===

    /// Makes `page` active. Asking for the active page does nothing.
    pub async fn set_page(&mut self, page: usize) -> Result<(), WizardError> {
        self.ensure_ready("setPage")?;
        self.go_to(Some(page)).await
    }

    /// Validates the active page, runs the forward hooks and moves to the
    /// next page. Read-only wizards skip validation and hooks.
    pub async fn next_page(&mut self) -> Result<(), WizardError> {
        self.ensure_ready("nextPage")?;

        if !self.options.read_only {
            let valid = ValidityAggregator::check_validity(
                &mut self.state,
                &self.submission.data,
                true,
                self.status.is_submitting(),
            );
            if !valid {
                let errors = ValidityAggregator::current_errors(&self.state);
                warn!(wizard = %self.id, page = self.state.page(), errors = errors.len(), "next page blocked by validation");
                self.redraw_surface().await?;
                return Err(WizardError::ValidationFailed(errors));
            }
            self.run_page_hooks(true).await?;
        }

        let next = NavigationEngine::get_next_page(&mut self.state, &self.submission.data);
        self.go_to(next).await?;
        self.emit(NextPageEvent::new(self.id, self.state.page(), &self.submission))
            .await
    }

    /// Runs the backward hooks and moves to the previous page, stopping at 0.
    pub async fn prev_page(&mut self) -> Result<(), WizardError> {
        self.ensure_ready("prevPage")?;
        self.run_page_hooks(false).await?;

        let previous = NavigationEngine::get_previous_page(&self.state);
        self.go_to(Some(previous)).await?;
        self.emit(PrevPageEvent::new(self.id, self.state.page(), &self.submission))
            .await
    }

    /// Resets the form and returns to the first page once the user confirms.
    /// Declining only redraws.
    pub async fn cancel(&mut self) -> Result<(), WizardError> {
        self.ensure_ready("cancel")?;
        if !self.deps.hooks.confirm_cancel().await {
            debug!(wizard = %self.id, "cancel declined");
            return self.go_to(None).await;
        }

        self.reset_submission();
        self.reopen()?;
        if self.state.page() == 0 {
            self.redraw().await?;
        } else {
            self.go_to(Some(0)).await?;
        }
        self.emit(CancelledEvent::new(self.id, self.state.page(), &self.submission))
            .await
    }

    /// Validates every page and runs the submit hooks.
    ///
    /// Returns the accepted submission. On failure the wizard goes back to
    /// `Ready` and stays on its page.
    pub async fn submit(&mut self) -> Result<Submission, WizardError> {
        self.ensure_ready("submit")?;
        if self.options.read_only {
            return Err(WizardError::NotReady(
                "Read-only wizards cannot be submitted".to_string(),
            ));
        }

        self.status = self.status.transition_to(WizardStatus::Submitting)?;
        match self.run_submit().await {
            Ok(()) => {
                self.status = self.status.transition_to(WizardStatus::Submitted)?;
                debug!(wizard = %self.id, "submission accepted");
                self.emit(SubmittedEvent::new(self.id, self.state.page(), &self.submission))
                    .await?;
                Ok(self.submission.clone())
            }
            Err(err) => {
                self.status = self.status.transition_to(WizardStatus::Ready)?;
                warn!(wizard = %self.id, error = %err, "submission rejected");
                if matches!(err, WizardError::ValidationFailed(_)) {
                    self.redraw_surface().await?;
                }
                Err(err)
            }
        }
    }

    // === Derived views ===

    /// Errors to show: every page's on the last page, the active page's elsewhere.
    pub fn errors(&mut self) -> Vec<FieldError> {
        ValidityAggregator::errors(&mut self.state, &self.submission.data)
    }

    /// Footer buttons shown on the active page.
    pub fn buttons(&mut self) -> ButtonVisibility {
        let next = NavigationEngine::get_next_page(&mut self.state, &self.submission.data);
        ButtonVisibility::evaluate(
            &self.state,
            next,
            &self.options.button_settings,
            self.options.read_only,
        )
    }

    /// Returns true if the breadcrumb for page `index` may be clicked.
    pub fn is_clickable(&self, index: usize) -> bool {
        is_clickable(&self.state, index, &self.options.breadcrumb_settings)
    }

    /// DOM id of page `index`.
    pub fn page_id(&self, index: usize) -> Option<String> {
        self.state.panels().get(index).map(page_id)
    }

    /// Tears down the component tree and releases the element.
    pub async fn destroy(&mut self) -> Result<(), WizardError> {
        ComponentTree::destroy(&mut self.state.pages, &mut self.state.global_components);
        self.rendered = None;
        if let Some(element) = self.element.take() {
            self.deps
                .binder
                .remove_event_listeners(&element)
                .await
                .map_err(WizardError::Collaborator)?;
        }
        debug!(wizard = %self.id, "wizard destroyed");
        Ok(())
    }

    // === Internals ===

    fn ensure_ready(&self, operation: &str) -> Result<(), WizardError> {
        if self.status.accepts_navigation() {
            Ok(())
        } else {
            Err(WizardError::NotReady(format!(
                "Cannot {} while the wizard is {}",
                operation, self.status
            )))
        }
    }

    /// A submitted wizard becomes editable again once its data changes.
    fn reopen(&mut self) -> Result<(), WizardError> {
        if self.status == WizardStatus::Submitted {
            self.status = self.status.transition_to(WizardStatus::Ready)?;
        }
        Ok(())
    }

    async fn go_to(&mut self, requested: Option<usize>) -> Result<(), WizardError> {
        let transition = NavigationEngine::plan(&self.state, requested, self.options.full)
            .map_err(|err| {
                warn!(wizard = %self.id, error = %err, "navigation rejected");
                WizardError::from(err)
            })?;

        match transition {
            PageTransition::Unchanged => Ok(()),
            PageTransition::Commit(page) => {
                let cursor = self.state.cursor();
                NavigationEngine::commit(
                    &mut self.state,
                    page,
                    &self.submission.data,
                    self.options.read_only,
                );
                if let Err(err) = self.redraw().await {
                    warn!(wizard = %self.id, page, error = %err, "redraw failed, page change rolled back");
                    self.state.restore(cursor.clone());
                    self.rebuild();
                    self.state.restore(cursor);
                    self.rendered = None;
                    return Err(err);
                }
                Ok(())
            }
            PageTransition::Redraw => self.redraw().await,
        }
    }

    async fn run_page_hooks(&self, next: bool) -> Result<(), WizardError> {
        let hooks = Arc::clone(&self.deps.hooks);
        let page = self.state.page();
        debug!(wizard = %self.id, page, next, "running page hooks");

        let verdict = if next {
            hooks.before_next(page, &self.submission).await
        } else {
            hooks.before_prev(page, &self.submission).await
        };
        verdict.map_err(|err| self.rejected(err))?;

        try_join_all(
            self.state
                .current_page()
                .iter()
                .map(|component| hooks.component_before_page(component.key(), next)),
        )
        .await
        .map_err(|err| self.rejected(err))?;
        Ok(())
    }

    async fn run_submit(&mut self) -> Result<(), WizardError> {
        let valid = ValidityAggregator::check_validity(
            &mut self.state,
            &self.submission.data,
            true,
            self.status.is_submitting(),
        );
        if !valid {
            let errors = ValidityAggregator::all_errors(&mut self.state, &self.submission.data);
            return Err(WizardError::ValidationFailed(errors));
        }

        let hooks = Arc::clone(&self.deps.hooks);
        hooks
            .before_submit(&self.submission)
            .await
            .map_err(|err| self.rejected(err))?;

        let keys: Vec<String> = PageModel::get_pages(&mut self.state, true)
            .iter()
            .flat_map(|handle| handle.components().iter().map(|c| c.key().to_string()))
            .collect();
        try_join_all(keys.iter().map(|key| hooks.component_before_submit(key)))
            .await
            .map_err(|err| self.rejected(err))?;
        Ok(())
    }

    fn rejected(&self, err: DomainError) -> WizardError {
        warn!(wizard = %self.id, code = %err.code, message = %err.message, "hook rejected transition");
        WizardError::HookRejected(err)
    }

    async fn on_change(&mut self) -> Result<(), WizardError> {
        if NavigationEngine::needs_rebuild(&mut self.state, &self.schema, &self.submission.data) {
            return self.redraw().await;
        }
        NavigationEngine::refresh(&mut self.state, &self.submission.data, self.options.read_only);
        Ok(())
    }

    fn rebuild(&mut self) {
        NavigationEngine::rebuild(
            &mut self.state,
            &self.schema,
            &self.submission.data,
            self.options.read_only,
        );
    }

    /// Full rebuild of the component tree, then render and attach again.
    async fn redraw(&mut self) -> Result<(), WizardError> {
        self.rebuild();
        self.redraw_surface().await
    }

    /// Render and attach again without rebuilding, keeping recorded errors.
    async fn redraw_surface(&mut self) -> Result<(), WizardError> {
        self.rendered = None;
        match self.element.clone() {
            Some(element) => self.attach(element).await,
            None => Ok(()),
        }
    }

    fn reset_submission(&mut self) {
        let mut submission = std::mem::take(&mut self.submission);
        for component in self.all_instances() {
            component.reset_value(&mut submission);
        }
        self.submission = submission;
    }

    fn all_instances(&self) -> impl Iterator<Item = &ComponentInstance> + '_ {
        self.state
            .global_components()
            .iter()
            .chain(self.state.pages().iter().flatten())
    }

    async fn emit<E: SerializableDomainEvent>(&self, event: E) -> Result<(), WizardError> {
        self.deps
            .publisher
            .publish(event.to_envelope())
            .await
            .map_err(WizardError::Collaborator)
    }
}

/// Renders `component`, rendering container children first.
fn render_component<'a>(
    renderer: &'a dyn TemplateRenderer,
    component: &'a ComponentInstance,
    data: &'a Map<String, Value>,
    disabled: bool,
    mode: RenderMode,
) -> BoxFuture<'a, Result<String, WizardError>> {
    async move {
        let mut context = component.render_context(data, disabled);
        if component.variant() == ComponentVariant::Container {
            let mut children = String::new();
            for child in component.children() {
                children.push_str(&render_component(renderer, child, data, disabled, mode).await?);
            }
            context["children"] = Value::String(children);
        }
        renderer
            .render_template(component.template_name(), &context, mode)
            .await
            .map_err(WizardError::Collaborator)
    }
    .boxed()
}
