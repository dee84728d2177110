use applicant_tracker::workflows::screening::{
    DatasetError, InMemoryScreeningRepository, ScreeningDataset, ScreeningScoreService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

use crate::demo::demo_dataset;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type ScoreService = ScreeningScoreService<InMemoryScreeningRepository>;

/// Loads the data set from `path`, falling back to the bundled demo data when none is given.
pub(crate) fn load_dataset(path: Option<&Path>) -> Result<ScreeningDataset, DatasetError> {
    match path {
        Some(path) => {
            let dataset = ScreeningDataset::from_path(path)?;
            info!(
                path = %path.display(),
                positions = dataset.positions.len(),
                applications = dataset.applications.len(),
                "loaded screening data set"
            );
            Ok(dataset)
        }
        None => {
            info!("no data set configured, serving demo data");
            Ok(demo_dataset())
        }
    }
}

pub(crate) fn build_service(dataset: ScreeningDataset) -> Arc<ScoreService> {
    let config = dataset.scoring.clone();
    let repository = Arc::new(InMemoryScreeningRepository::new(dataset));
    Arc::new(ScreeningScoreService::new(repository, config))
}
