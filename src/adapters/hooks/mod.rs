//! Navigation hook adapters.

mod scripted;

pub use scripted::{AcceptAllHooks, HookCall, HookPoint, ScriptedHooks};
