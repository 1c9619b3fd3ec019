pub mod orchestration;

pub use orchestration::{
    default_version_finder, resolve_key, ReleaseOptions, ReleaseOutcome, ReleaseWorkflow,
};
