use std::fmt::Write;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct MealPass {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subscription_id: Uuid,
    /// User id of the mess owner whose plan issued the pass.
    pub owner_id: Uuid,
    pub qr_code: String,
    pub is_active: bool,
    pub is_blocked: bool,
    pub block_reason: Option<String>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_till: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MealPass {
    /// A pass without a complete window is never within it.
    pub fn is_within_window(&self, now: DateTime<Utc>) -> bool {
        match (self.valid_from, self.valid_till) {
            (Some(from), Some(till)) => from <= now && now <= till,
            _ => false,
        }
    }

    pub fn is_usable(&self) -> bool {
        self.is_active && !self.is_blocked
    }
}

#[derive(Debug, Clone)]
pub struct NewMealPass {
    pub user_id: Uuid,
    pub subscription_id: Uuid,
    pub owner_id: Uuid,
    pub qr_code: String,
    pub valid_from: DateTime<Utc>,
    pub valid_till: DateTime<Utc>,
}

/// Fields hashed into a pass's QR code.
#[derive(Debug, Clone)]
pub struct QrPayload<'a> {
    pub user_id: Uuid,
    pub subscription_id: Uuid,
    pub plan_id: Uuid,
    pub owner_id: Uuid,
    pub meal_type: &'a str,
    pub issued_at: DateTime<Utc>,
}

impl QrPayload<'_> {
    /// Lowercase hex SHA-256 of the payload serialised as compact JSON with sorted keys.
    ///
    /// The result is an opaque lookup key: validation compares it against the
    /// stored pass and never rebuilds it from the fields.
    pub fn qr_code(&self) -> String {
        // keys inserted in sorted order
        let mut map = serde_json::Map::new();
        map.insert("mealType".into(), self.meal_type.into());
        map.insert("messId".into(), self.owner_id.to_string().into());
        map.insert("planId".into(), self.plan_id.to_string().into());
        map.insert("subscriptionId".into(), self.subscription_id.to_string().into());
        map.insert("timestamp".into(), self.issued_at.timestamp().into());
        map.insert("userId".into(), self.user_id.to_string().into());
        let json = serde_json::Value::Object(map).to_string();

        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        let digest = hasher.finalize();
        let mut out = String::with_capacity(64);
        for byte in digest {
            let _ = write!(&mut out, "{:02x}", byte);
        }
        out
    }
}
