/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - Project descriptors on disk (project.rs)
/// - Current/recent projects and settings (registry.rs)
/// - The session tying project switches to cache invalidation (workspace.rs)

pub mod data;
pub mod project;
pub mod registry;
pub mod workspace;
