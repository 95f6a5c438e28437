//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use kernel::id::{ConfessionId, ReplyId};
use std::sync::Arc;

use crate::application::{
    BrowseUseCase, CallerIdentity, CastVoteInput, CastVoteUseCase, ConfessionConfig,
    CreateReplyInput, CreateReplyUseCase, GetConfessionUseCase, ListRepliesUseCase,
    PublishConfessionUseCase, PublishInput, ReviewModerationUseCase, SearchInput, SearchUseCase,
    StatsUseCase, StorageInfoUseCase,
};
use crate::domain::gateway::{ModerationClient, UploadGateway};
use crate::domain::repository::BoardRepository;
use crate::domain::value_object::page::{DEFAULT_FEED_LIMIT, DEFAULT_REPLIES_LIMIT};
use crate::domain::value_object::{Page, VoteTarget};
use crate::error::{ConfessionError, ConfessionResult};
use crate::presentation::extract::{JsonBody, QueryParams};
use crate::presentation::dto::{
    AddressResponse, BalanceResponse, ConfessionListResponse, ConfessionResponse,
    CreateConfessionRequest, CreateConfessionResponse, CreateReplyRequest, CreateReplyResponse,
    HealthResponse, LimitQuery, NetworkInfoResponse, PageQuery, ReplyListResponse, ReplyResponse,
    ReviewResponse, SearchRequest, SearchResponse, ServiceInfoResponse, StatsResponse,
    TrendingTagsResponse, VoteRequest, VoteResponse,
};

/// Shared state for confession handlers
pub struct ConfessionAppState<R, G, M> {
    pub repo: Arc<R>,
    pub gateway: Arc<G>,
    pub moderation: Arc<M>,
    pub config: Arc<ConfessionConfig>,
}

// Manual impl: only the Arcs are cloned, the collaborators need not be Clone
impl<R, G, M> Clone for ConfessionAppState<R, G, M> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            gateway: self.gateway.clone(),
            moderation: self.moderation.clone(),
            config: self.config.clone(),
        }
    }
}

fn parse_confession_id(raw: &str) -> ConfessionResult<ConfessionId> {
    raw.trim()
        .parse()
        .map_err(|_| ConfessionError::ConfessionNotFound)
}

fn parse_reply_id(raw: &str) -> ConfessionResult<ReplyId> {
    raw.trim().parse().map_err(|_| ConfessionError::ReplyNotFound)
}

// ============================================================================
// Service
// ============================================================================

/// GET /api/
pub async fn root() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        message: "Confession Board API",
        status: "running",
    })
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
    })
}

// ============================================================================
// Confessions
// ============================================================================

/// POST /api/confessions
pub async fn create_confession<R, G, M>(
    State(state): State<ConfessionAppState<R, G, M>>,
    Extension(caller): Extension<CallerIdentity>,
    JsonBody(req): JsonBody<CreateConfessionRequest>,
) -> ConfessionResult<(StatusCode, Json<CreateConfessionResponse>)>
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    let use_case = PublishConfessionUseCase::new(
        state.repo.clone(),
        state.gateway.clone(),
        state.moderation.clone(),
        state.config.clone(),
    );

    let input = PublishInput {
        content: req.content,
        is_public: req.is_public,
        author: req.author,
        author_user_id: caller.user_id,
        mood: req.mood,
        tags: req.tags,
    };

    let confession = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateConfessionResponse::from(&confession)),
    ))
}

/// GET /api/confessions/public
pub async fn public_feed<R, G, M>(
    State(state): State<ConfessionAppState<R, G, M>>,
    QueryParams(query): QueryParams<PageQuery>,
) -> ConfessionResult<Json<ConfessionListResponse>>
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    let page = Page::new(query.limit, query.offset, DEFAULT_FEED_LIMIT);
    let confessions = BrowseUseCase::new(state.repo.clone())
        .public_feed(page)
        .await?;

    Ok(Json(ConfessionListResponse::paged(
        &confessions,
        page.limit,
        page.offset,
    )))
}

/// GET /api/confessions/{tx_id}
pub async fn get_confession<R, G, M>(
    State(state): State<ConfessionAppState<R, G, M>>,
    Path(tx_id): Path<String>,
) -> ConfessionResult<Json<ConfessionResponse>>
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    let confession = GetConfessionUseCase::new(state.repo.clone())
        .execute(&tx_id)
        .await?;

    Ok(Json(ConfessionResponse::from(&confession)))
}

/// POST /api/confessions/{id}/review
pub async fn review_moderation<R, G, M>(
    State(state): State<ConfessionAppState<R, G, M>>,
    Path(id): Path<String>,
) -> ConfessionResult<Json<ReviewResponse>>
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    let confession_id = parse_confession_id(&id)?;
    let output = ReviewModerationUseCase::new(state.repo.clone(), state.moderation.clone())
        .execute(confession_id)
        .await?;

    Ok(Json(ReviewResponse::new(&output.confession, output.updated)))
}

/// GET /api/trending
pub async fn trending<R, G, M>(
    State(state): State<ConfessionAppState<R, G, M>>,
    QueryParams(query): QueryParams<LimitQuery>,
) -> ConfessionResult<Json<ConfessionListResponse>>
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    let confessions = BrowseUseCase::new(state.repo.clone())
        .trending(query.limit)
        .await?;

    Ok(Json(ConfessionListResponse::new(&confessions)))
}

/// GET /api/tags/trending
pub async fn trending_tags<R, G, M>(
    State(state): State<ConfessionAppState<R, G, M>>,
    QueryParams(query): QueryParams<LimitQuery>,
) -> ConfessionResult<Json<TrendingTagsResponse>>
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    let tags = BrowseUseCase::new(state.repo.clone())
        .trending_tags(query.limit)
        .await?;

    Ok(Json(TrendingTagsResponse { tags }))
}

// ============================================================================
// Votes
// ============================================================================

async fn cast_vote<R, G, M>(
    state: &ConfessionAppState<R, G, M>,
    caller: &CallerIdentity,
    target: VoteTarget,
    req: VoteRequest,
) -> ConfessionResult<Json<VoteResponse>>
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    let use_case = CastVoteUseCase::new(state.repo.clone(), state.repo.clone(), state.repo.clone());

    let counts = use_case
        .execute(CastVoteInput {
            target,
            vote_type: req.vote_type.clone(),
            voter_identity: caller.voter_identity(req.user_address.as_deref()),
        })
        .await?;

    Ok(Json(VoteResponse::new(&req.vote_type, counts)))
}

/// POST /api/confessions/{id}/vote
pub async fn vote_confession<R, G, M>(
    State(state): State<ConfessionAppState<R, G, M>>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<VoteRequest>,
) -> ConfessionResult<Json<VoteResponse>>
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    let target = VoteTarget::Confession(parse_confession_id(&id)?);
    cast_vote(&state, &caller, target, req).await
}

/// POST /api/replies/{id}/vote
pub async fn vote_reply<R, G, M>(
    State(state): State<ConfessionAppState<R, G, M>>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<VoteRequest>,
) -> ConfessionResult<Json<VoteResponse>>
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    let target = VoteTarget::Reply(parse_reply_id(&id)?);
    cast_vote(&state, &caller, target, req).await
}

// ============================================================================
// Replies
// ============================================================================

/// POST /api/confessions/{id}/replies
pub async fn create_reply<R, G, M>(
    State(state): State<ConfessionAppState<R, G, M>>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<CreateReplyRequest>,
) -> ConfessionResult<(StatusCode, Json<CreateReplyResponse>)>
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    let confession_id = parse_confession_id(&id)?;
    let use_case = CreateReplyUseCase::new(state.repo.clone(), state.repo.clone());

    let reply = use_case
        .execute(CreateReplyInput {
            confession_id,
            parent_reply_id: req.parent_reply_id.map(ReplyId::from_uuid),
            content: req.content,
            author: req.author,
            author_user_id: caller.user_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReplyResponse {
            status: "success",
            reply: ReplyResponse::from(&reply),
        }),
    ))
}

/// GET /api/confessions/{id}/replies
pub async fn list_replies<R, G, M>(
    State(state): State<ConfessionAppState<R, G, M>>,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<PageQuery>,
) -> ConfessionResult<Json<ReplyListResponse>>
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    let confession_id = parse_confession_id(&id)?;
    let page = Page::new(query.limit, query.offset, DEFAULT_REPLIES_LIMIT);

    let replies = ListRepliesUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(confession_id, page)
        .await?;

    Ok(Json(ReplyListResponse {
        count: replies.len(),
        replies: replies.iter().map(ReplyResponse::from).collect(),
        limit: page.limit,
        offset: page.offset,
    }))
}

// ============================================================================
// Search / Analytics
// ============================================================================

/// POST /api/search
pub async fn search<R, G, M>(
    State(state): State<ConfessionAppState<R, G, M>>,
    JsonBody(req): JsonBody<SearchRequest>,
) -> ConfessionResult<Json<SearchResponse>>
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    let input = SearchInput {
        query: req.query,
        mood: req.mood,
        tags: req.tags,
        sort_by: req.sort_by,
        sort_order: req.sort_order,
        limit: req.limit,
        offset: req.offset,
    };

    let output = SearchUseCase::new(state.repo.clone()).execute(input).await?;
    let criteria = output.criteria;

    Ok(Json(SearchResponse {
        count: output.confessions.len(),
        confessions: output
            .confessions
            .iter()
            .map(ConfessionResponse::from)
            .collect(),
        query: criteria.query,
        mood: criteria.mood,
        tags: criteria.tags,
        sort_by: criteria.sort_by.code(),
        sort_order: criteria.sort_order.code(),
        limit: criteria.page.limit,
        offset: criteria.page.offset,
    }))
}

/// GET /api/analytics/stats
pub async fn stats<R, G, M>(
    State(state): State<ConfessionAppState<R, G, M>>,
) -> ConfessionResult<Json<StatsResponse>>
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    let stats = StatsUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(stats))
}

// ============================================================================
// Storage network
// ============================================================================

/// GET /api/irys/network-info
pub async fn network_info<R, G, M>(
    State(state): State<ConfessionAppState<R, G, M>>,
) -> Json<NetworkInfoResponse>
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    Json(StorageInfoUseCase::new(state.gateway.clone(), state.config.clone()).network())
}

/// GET /api/irys/balance
pub async fn wallet_balance<R, G, M>(
    State(state): State<ConfessionAppState<R, G, M>>,
) -> ConfessionResult<Json<BalanceResponse>>
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    let balance = StorageInfoUseCase::new(state.gateway.clone(), state.config.clone())
        .balance()
        .await?;
    Ok(Json(balance))
}

/// GET /api/irys/address
pub async fn wallet_address<R, G, M>(
    State(state): State<ConfessionAppState<R, G, M>>,
) -> ConfessionResult<Json<AddressResponse>>
where
    R: BoardRepository,
    G: UploadGateway + Sync + 'static,
    M: ModerationClient + Sync + 'static,
{
    let address = StorageInfoUseCase::new(state.gateway.clone(), state.config.clone())
        .address()
        .await?;
    Ok(Json(AddressResponse { address }))
}
