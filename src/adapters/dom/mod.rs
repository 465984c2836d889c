//! Element binder adapters.

mod recording_binder;

pub use recording_binder::{Listener, RecordingBinder};
