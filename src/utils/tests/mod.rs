// Test module organization for utils
// This module is only compiled during testing via #[cfg(test)] in utils/mod.rs

use crate::utils::file_interaction_local_and_cloud::{read_all, resolve};
