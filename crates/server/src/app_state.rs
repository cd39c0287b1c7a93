use crate::temp_data::TempDataStore;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) temp_data: TempDataStore,
    pub(crate) max_body_bytes: usize,
}
