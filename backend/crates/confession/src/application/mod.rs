//! Application Layer
//!
//! Use cases and application services.

pub mod browse;
pub mod caller;
pub mod cast_vote;
pub mod config;
pub mod get_confession;
pub mod publish_confession;
pub mod replies;
pub mod review_moderation;
pub mod search;
pub mod stats;
pub mod storage_info;

// Re-exports
pub use browse::BrowseUseCase;
pub use caller::CallerIdentity;
pub use cast_vote::{CastVoteInput, CastVoteUseCase};
pub use config::{ConfessionConfig, GatewayConfig, ModerationConfig, NetworkInfo};
pub use get_confession::GetConfessionUseCase;
pub use publish_confession::{PublishConfessionUseCase, PublishInput};
pub use replies::{CreateReplyInput, CreateReplyUseCase, ListRepliesUseCase};
pub use review_moderation::{ReviewModerationUseCase, ReviewOutput};
pub use search::{SearchInput, SearchOutput, SearchUseCase};
pub use stats::StatsUseCase;
pub use storage_info::StorageInfoUseCase;
