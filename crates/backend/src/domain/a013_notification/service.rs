use contracts::domain::a013_notification::dto::{
    DeviceToken, DispatchOutcome, NotificationLog, NotificationType, SaveTokenRequest,
    SendTargetedRequest, SendToAllRequest,
};
use uuid::Uuid;

use super::repository;
use crate::domain::a001_user;
use crate::shared::error::{DomainError, DomainResult};
use crate::shared::push;

/// Register a device token for a user
pub async fn save_token(request: SaveTokenRequest) -> DomainResult<DeviceToken> {
    if request.user_ref.trim().is_empty() || request.token.trim().is_empty() {
        return Err(DomainError::validation("userRef and token are required"));
    }

    let user_id = Uuid::parse_str(&request.user_ref)
        .map_err(|_| DomainError::validation("Invalid userRef"))?;
    if a001_user::repository::get_by_id(user_id).await?.is_none() {
        return Err(DomainError::not_found("User not found"));
    }

    Ok(repository::upsert_token(&request.user_ref, &request.token).await?)
}

pub async fn remove_token(token: &str) -> DomainResult<()> {
    repository::delete_token(token).await?;
    Ok(())
}

/// Dispatch to every registered device and prune tokens the gateway
/// reports as invalid.
async fn dispatch(
    tokens: Vec<String>,
    title: &str,
    description: &str,
    data: serde_json::Map<String, serde_json::Value>,
) -> DomainResult<DispatchOutcome> {
    let outcome = push::send_multicast(push::gateway(), &tokens, title, description, &data).await;

    let pruned = if outcome.invalid_tokens.is_empty() {
        0
    } else {
        let pruned = repository::delete_tokens(&outcome.invalid_tokens).await?;
        tracing::info!("Pruned {} invalid device tokens", pruned);
        pruned as usize
    };

    Ok(DispatchOutcome {
        success_count: outcome.success_count,
        failure_count: outcome.failure_count,
        pruned_tokens: pruned,
    })
}

/// Broadcast to all users
pub async fn send_to_all(request: SendToAllRequest) -> DomainResult<DispatchOutcome> {
    if request.title.trim().is_empty() || request.description.trim().is_empty() {
        return Err(DomainError::validation("title and description are required"));
    }

    let tokens = repository::all_tokens().await?;
    let recipients = tokens.len() as i64;
    let data = request.payload.clone().unwrap_or_default();

    let outcome = dispatch(tokens, &request.title, &request.description, data).await?;

    let payload = serde_json::json!({
        "successCount": outcome.success_count,
        "failureCount": outcome.failure_count,
    });
    repository::insert_log(
        &request.title,
        &request.description,
        request.created_by.as_deref(),
        request.created_by_name.as_deref(),
        NotificationType::General,
        None,
        recipients,
        Some(&payload),
    )
    .await?;

    Ok(outcome)
}

/// Notify users in the given districts who grow/hold the given product
pub async fn send_targeted(request: SendTargetedRequest) -> DomainResult<DispatchOutcome> {
    if request.title.trim().is_empty() || request.description.trim().is_empty() {
        return Err(DomainError::validation("title and description are required"));
    }
    if request.districts.is_empty() || request.product_ref.trim().is_empty() {
        return Err(DomainError::validation("districts and productRef are required"));
    }

    let tokens =
        repository::tokens_for_districts_and_product(&request.districts, &request.product_ref)
            .await?;
    let recipients = tokens.len() as i64;

    let mut data = request.payload.clone().unwrap_or_default();
    data.entry("productRef".to_string())
        .or_insert_with(|| serde_json::Value::String(request.product_ref.clone()));

    let outcome = dispatch(tokens, &request.title, &request.description, data).await?;

    let target_info = serde_json::json!({
        "districts": request.districts,
        "productRef": request.product_ref,
    });
    let payload = serde_json::json!({
        "successCount": outcome.success_count,
        "failureCount": outcome.failure_count,
    });
    repository::insert_log(
        &request.title,
        &request.description,
        request.created_by.as_deref(),
        request.created_by_name.as_deref(),
        NotificationType::Targeted,
        Some(&target_info),
        recipients,
        Some(&payload),
    )
    .await?;

    Ok(outcome)
}

pub async fn list_logs(limit: u64, offset: u64) -> DomainResult<Vec<NotificationLog>> {
    Ok(repository::list_logs(limit, offset).await?)
}
