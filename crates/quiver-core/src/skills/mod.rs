pub mod descriptor;
pub mod loader;
pub mod matcher;
pub mod registry;
pub mod selector;

pub use descriptor::SkillDescriptor;
pub use loader::{SkillLoader, SkippedDocument};
pub use matcher::{KeywordMatcher, Matcher};
pub use registry::{LoadReport, SkillRegistry};
pub use selector::{Activation, SkillSelector};
