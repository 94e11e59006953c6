#![allow(dead_code)]

pub mod registry;

pub use registry::{MockRegistry, create_project_tree, project_file};
