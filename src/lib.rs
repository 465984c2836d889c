//! Form Wizard - multi-page form engine
//!
//! This crate turns a declarative form definition into a paged wizard: it
//! builds the component tree from panel nodes, evaluates conditional
//! visibility and `nextPage` flow, validates the active page (or every page
//! on submit) and drives the render, attach and navigate protocol against
//! pluggable renderer, binder, hook and event-publisher ports.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use form_wizard::adapters::{
//!     AcceptAllHooks, FileFormLoader, HtmlTemplateRenderer, InMemoryEventBus, RecordingBinder,
//! };
//! use form_wizard::application::{WizardController, WizardDeps};
//! use form_wizard::config::AppConfig;
//! use form_wizard::ports::ElementHandle;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let deps = WizardDeps {
//!     renderer: Arc::new(HtmlTemplateRenderer::new()),
//!     binder: Arc::new(RecordingBinder::new()),
//!     publisher: Arc::new(InMemoryEventBus::new()),
//!     hooks: Arc::new(AcceptAllHooks),
//! };
//!
//! let mut wizard = WizardController::new(deps, config.wizard);
//! wizard.load(&FileFormLoader::new("forms/onboarding.json")).await?;
//! wizard.attach(ElementHandle::new("form")).await?;
//! wizard.next_page().await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
