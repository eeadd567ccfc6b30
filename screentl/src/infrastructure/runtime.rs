// screentl
// SPDX-License-Identifier: BSD-3-Clause

//! Task supervision and system-wide resource governance.

pub mod cancellation;
pub mod resource_manager;
pub mod supervisor;

pub use cancellation::CancellationToken;
pub use resource_manager::{init_resource_manager, resource_manager, GlobalResourceManager, ResourceConfig};
pub use supervisor::{join_supervised, spawn_supervised, AppResult};
