use axum::Json;

use tecnologuia_shared::types::auth::AuthUser;
use tecnologuia_shared::types::MessageResponse;

/// Sessions are stateless bearer tokens, so logging out is the client
/// discarding its token. The endpoint only acknowledges, with or without one.
pub async fn logout(user: Option<AuthUser>) -> Json<MessageResponse> {
    if let Some(user) = user {
        tracing::info!(user_id = %user.id, token_id = %user.token_id, "user logged out");
    }
    Json(MessageResponse::new("logged out successfully"))
}
