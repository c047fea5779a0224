use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type CallId = i64;

/// Login account. Only the demo seeder writes these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallCenterUser {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
}

/// A call log row before the store assigns its `callId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCallLog {
    pub phone_number: String,
    pub start_time: i64,
    pub end_time: i64,
    pub direction: String,
    pub user_id: UserId,
}

impl NewCallLog {
    /// Row-level acceptance rule applied before insert.
    pub fn is_valid(&self) -> bool {
        !self.phone_number.is_empty() && !self.direction.is_empty() && self.end_time > self.start_time
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallLog {
    pub call_id: CallId,
    pub phone_number: String,
    pub start_time: i64,
    pub end_time: i64,
    pub direction: String,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_calls: i64,
    /// Mean `endTime - startTime`, rounded to one decimal.
    pub avg_call_duration: f64,
    pub active_users: i64,
}

/// Per-user call figures, one row per `userId` present in `callLogs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalytics {
    pub user_id: UserId,
    pub avg_duration: f64,
    pub num_calls: i64,
}
