use std::path::PathBuf;
use std::sync::Arc;

use crate::extractor::MediaExtractor;

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn MediaExtractor>,
    pub download_dir: PathBuf
}

impl AppState {
    pub fn new(extractor: impl MediaExtractor + 'static, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            extractor: Arc::new(extractor),
            download_dir: download_dir.into()
        }
    }
}
