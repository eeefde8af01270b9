use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::clock::Clock;
use service::member::{repo::seaorm::SeaOrmMemberRepository, MemberService};

pub type Members = MemberService<SeaOrmMemberRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub members: Members,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmMemberRepository::new(db));
        Self { members: MemberService::with_system_clock(repo) }
    }

    pub fn with_clock(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        let repo = Arc::new(SeaOrmMemberRepository::new(db));
        Self { members: MemberService::new(repo, clock) }
    }
}
