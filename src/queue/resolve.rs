use serde::Serialize;
use tracing::info;

use crate::clients::ConnectApi;
use crate::core::models::{QueueProperties, QueueRecord};
use crate::errors::ApiError;

/// `Data` returned for a resolved queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueData {
    #[serde(rename = "QueueName")]
    pub name: String,
    #[serde(rename = "QueueArn")]
    pub arn: Option<String>,
    #[serde(rename = "QueueId")]
    pub id: Option<String>,
}

impl From<QueueRecord> for QueueData {
    fn from(record: QueueRecord) -> Self {
        Self {
            name: record
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "None".to_string()),
            arn: record.arn,
            id: record.id,
        }
    }
}

/// Looks up the queue by exact name and returns the first match.
///
/// # Errors
///
/// Returns the [`ApiError`] of a failed `SearchQueues` call.
pub async fn resolve_queue<C>(client: &C, props: &QueueProperties) -> Result<Option<QueueData>, ApiError>
where
    C: ConnectApi + ?Sized,
{
    let queues = client
        .search_queues_by_name(props.instance_id(), &props.queue_name)
        .await?;

    let Some(first) = queues.into_iter().next() else {
        info!("Queue with name {} was not found.", props.queue_name);
        return Ok(None);
    };

    info!("Queue Found: {:?}", first);
    Ok(Some(first.into()))
}
