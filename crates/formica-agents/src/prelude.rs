//! Formica Agents Prelude: convenient imports for common usage.
//!
//! ```rust
//! use formica_agents::prelude::*;
//! ```

pub use crate::engine::Colonist;
pub use crate::cache::PerceptionCache;
pub use crate::coordinator::AttackPoint;
pub use crate::assignment::{FixedRolePolicy, QuotaRolePolicy, RoleCounts, RolePolicy};

// Re-export from core
pub use formica_core::prelude::*;
