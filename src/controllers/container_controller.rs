use futures_util::future::join_all;
use tracing::{info, warn};

use crate::{
    controllers::{connection_controller, launch_controller},
    error::AppError,
    models::{
        container_models::{ContainerRecord, DisplayRow, InspectedContainer},
        launch_models::LaunchRequest,
    },
    runtime::{RuntimeClient, RuntimeError},
};

/// Label every Atlas Local container carries, set by the image and by launch.
pub const ATLAS_LOCAL_LABEL: &str = "mongodb-atlas-local";
pub const ATLAS_LOCAL_LABEL_VALUE: &str = "container";

pub fn label_filter() -> String {
    format!("{}={}", ATLAS_LOCAL_LABEL, ATLAS_LOCAL_LABEL_VALUE)
}

fn to_display_row(record: &ContainerRecord, error: Option<String>) -> DisplayRow {
    DisplayRow {
        id: record.id.clone(),
        name: record.display_name(),
        status: record.status.clone(),
        version: record.version(),
        connection_string: connection_controller::connection_string(record),
        error,
    }
}

/// Inspects a listed container unless the list call already carried its env.
async fn inspect(
    runtime: &dyn RuntimeClient,
    record: &ContainerRecord,
) -> Result<Option<InspectedContainer>, RuntimeError> {
    if record.env.is_some() {
        return Ok(None);
    }
    runtime.inspect_container(&record.id).await.map(Some)
}

/// Lists Atlas Local containers as UI rows, in the order the engine reports.
///
/// Inspects run concurrently. With `strict_mode` any failed inspect fails the
/// whole listing; otherwise the row is kept without a connection string and
/// carries the error text.
pub async fn list_containers(
    runtime: &dyn RuntimeClient,
    strict_mode: bool,
) -> Result<Vec<DisplayRow>, AppError> {
    let containers = runtime
        .list_containers(&label_filter())
        .await
        .map_err(|err| AppError::RuntimeUnavailable(err.to_string()))?;

    let inspections = join_all(containers.iter().map(|record| inspect(runtime, record))).await;

    let mut rows = Vec::with_capacity(containers.len());
    for (record, inspection) in containers.into_iter().zip(inspections) {
        match inspection {
            Ok(Some(inspected)) => {
                rows.push(to_display_row(&record.with_inspection(inspected), None))
            }
            Ok(None) => rows.push(to_display_row(&record, None)),
            Err(err) if strict_mode => {
                return Err(AppError::InspectFailed {
                    id: record.id,
                    message: err.to_string(),
                });
            }
            Err(err) => {
                warn!(container_id = %record.id, error = %err, "inspect failed, keeping row without connection string");
                let record = ContainerRecord {
                    ports: Vec::new(),
                    ..record
                };
                rows.push(to_display_row(&record, Some(err.to_string())));
            }
        }
    }
    Ok(rows)
}

/// Case-insensitive substring filter over the visible columns. A blank query
/// keeps every row.
pub fn filter_rows(rows: Vec<DisplayRow>, query: &str) -> Vec<DisplayRow> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| {
            [
                Some(row.name.as_str()),
                Some(row.id.as_str()),
                Some(row.status.as_str()),
                Some(row.version.as_str()),
                row.connection_string.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|column| column.to_lowercase().contains(&query))
        })
        .collect()
}

/// Validates the request, then creates and starts the container. Does not
/// wait for mongod to become healthy and does not remove a container whose
/// start failed.
pub async fn launch_container(
    runtime: &dyn RuntimeClient,
    request: &LaunchRequest,
) -> Result<String, AppError> {
    let params = launch_controller::build(request).map_err(AppError::ValidationFailed)?;

    let id = runtime
        .create_container(&params)
        .await
        .map_err(|err| AppError::LaunchFailed(err.to_string()))?;
    info!(container_id = %id, name = ?params.name, host_port = ?params.host_port, "created container");

    runtime
        .start_container(&id)
        .await
        .map_err(|err| AppError::LaunchFailed(err.to_string()))?;
    info!(container_id = %id, "started container");
    Ok(id)
}
