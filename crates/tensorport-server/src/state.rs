//! Shared application state injected into every handler.

use std::sync::Arc;
use tensorport_runtime::DataPlane;

#[derive(Clone)]
pub struct AppState {
    pub data_plane: Arc<DataPlane>,
}

impl AppState {
    pub fn new(data_plane: Arc<DataPlane>) -> Self {
        Self { data_plane }
    }
}
