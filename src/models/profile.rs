use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display projection of a platform user, used for existence checks and for
/// enriching block lists. The full profile lives in the identity context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub user_id: Uuid,
    pub display_name: String,
    pub handle: String,
    pub avatar_url: Option<String>,
}
