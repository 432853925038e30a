//! State

use std::sync::Arc;

use readitagain_app::context::AppContext;

use crate::uploads::Uploads;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) uploads: Uploads,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, uploads: Uploads) -> Arc<Self> {
        Arc::new(Self { app, uploads })
    }
}
