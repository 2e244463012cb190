use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimal gig projection needed for messaging authorization. The full gig
/// aggregate lives in the marketplace context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gig {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Shortlisted,
    Accepted,
    Declined,
}

/// An applicant's application to a gig. A declined applicant loses the
/// right to message (and be messaged by) the gig owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GigApplication {
    pub id: Uuid,
    pub gig_id: Uuid,
    pub applicant_user_id: Uuid,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

impl GigApplication {
    pub fn is_declined(&self) -> bool {
        self.status == ApplicationStatus::Declined
    }
}
