use crate::catalog::Catalog;

pub struct AppState {
    pub catalog: Catalog,
}
