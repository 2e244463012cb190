//! Application layer: request-scoped orchestrations over the aggregates,
//! repositories, moderation service and event bus. Dependencies are injected
//! through constructors; the service graph is built once at process start.

pub mod block_user;
pub mod check_user_blocked;
pub mod get_blocked_users;
pub mod get_conversations;
pub mod report_message;
pub mod send_message;
pub mod unblock_user;

pub use block_user::{BlockUserCommand, BlockUserResult, BlockUserUseCase};
pub use check_user_blocked::{BlockStatus, CheckUserBlockedQuery, CheckUserBlockedUseCase};
pub use get_blocked_users::{
    BlockedUserView, GetBlockedUsersQuery, GetBlockedUsersResult, GetBlockedUsersUseCase,
};
pub use get_conversations::{ConversationSummary, GetConversationsQuery, GetConversationsUseCase};
pub use report_message::{ReportMessageCommand, ReportMessageResult, ReportMessageUseCase};
pub use send_message::{SendMessageCommand, SendMessageResult, SendMessageUseCase};
pub use unblock_user::{UnblockUserCommand, UnblockUserResult, UnblockUserUseCase};

use crate::error::Result;
use crate::repository::UserBlockRepository;
use uuid::Uuid;

/// Two users can communicate when neither direction blocks the other.
pub(crate) async fn can_communicate(
    blocks: &dyn UserBlockRepository,
    user_a: Uuid,
    user_b: Uuid,
) -> Result<bool> {
    Ok(blocks.find_between(user_a, user_b).await?.is_none()
        && blocks.find_between(user_b, user_a).await?.is_none())
}
