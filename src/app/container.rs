use std::sync::Arc;

use crate::adapters::{FFmpegAdapter, FsLocalAdapter, InfoJsonAdapter, TracingLogAdapter};
use crate::app::{inspect_interactor::InspectInteractor, split_interactor::SplitInteractor};
use crate::config_initialization::SplitterConfig;
use crate::domain::errors::DomainError;
use crate::ports::{FsPort, LogPort, MetadataPort, TrimPort};

pub trait AppContainer: Send + Sync {
    fn split_interactor(&self) -> Arc<SplitInteractor>;
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
    fn metadata_port(&self) -> Arc<dyn MetadataPort>;
    fn fs_port(&self) -> Arc<dyn FsPort>;
}

pub struct DefaultAppContainer {
    split_interactor: Arc<SplitInteractor>,
    inspect_interactor: Arc<InspectInteractor>,
    metadata_port: Arc<dyn MetadataPort>,
    fs_port: Arc<dyn FsPort>,
}

impl DefaultAppContainer {
    pub fn new(config: &SplitterConfig) -> Result<Self, DomainError> {
        let trim_port = Arc::new(FFmpegAdapter::new(config.ffmpeg_path.clone(), config.overwrite)?);
        let fs_port = Arc::new(FsLocalAdapter::new()?);
        let metadata_port = Arc::new(InfoJsonAdapter::new()?);
        let log_port = Arc::new(TracingLogAdapter::new());

        let split_interactor = Arc::new(SplitInteractor::new(
            Arc::clone(&trim_port) as Arc<dyn TrimPort>,
            Arc::clone(&fs_port) as Arc<dyn FsPort>,
            Arc::clone(&log_port) as Arc<dyn LogPort>,
        ));

        let inspect_interactor = Arc::new(InspectInteractor::new(
            Arc::clone(&metadata_port) as Arc<dyn MetadataPort>,
            Arc::clone(&log_port) as Arc<dyn LogPort>,
        ));

        Ok(Self {
            split_interactor,
            inspect_interactor,
            metadata_port,
            fs_port,
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn split_interactor(&self) -> Arc<SplitInteractor> {
        Arc::clone(&self.split_interactor)
    }

    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }

    fn metadata_port(&self) -> Arc<dyn MetadataPort> {
        Arc::clone(&self.metadata_port)
    }

    fn fs_port(&self) -> Arc<dyn FsPort> {
        Arc::clone(&self.fs_port)
    }
}
