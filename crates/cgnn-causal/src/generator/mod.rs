//! Generator models: per-variable mechanisms trained by MMD minimisation.

pub mod adam;
pub mod mechanism;
pub mod mlp;
pub mod model;
pub mod plan;
pub mod polynomial;
pub mod retry;

pub use mechanism::{build_mechanism, Gradients, Mechanism, MechanismPass};
pub use model::{GeneratorModel, ModelState};
pub use plan::{Conditioning, GenerationPlan, PlanStep};
pub use retry::with_fresh_state;
