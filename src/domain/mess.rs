use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const DEFAULT_MESS_IMAGE: &str =
    "http://res.cloudinary.com/dq3ro4o3c/image/upload/v1734445757/gngcgm82wwo5t0desu0w.jpg";

pub const NAME_MAX_LEN: usize = 100;
pub const MOBILE_MAX_LEN: usize = 15;
pub const ADDRESS_MAX_LEN: usize = 500;
pub const DESCRIPTION_MAX_LEN: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessRating {
    pub user_id: Uuid,
    pub rating: i32,
}

#[derive(Debug, Clone)]
pub struct Mess {
    pub id: Uuid,
    pub mess_number: i64,
    pub name: String,
    pub mobile_no: String,
    pub capacity: i32,
    pub address: String,
    pub owner_id: Uuid,
    pub owner_number: i64,
    pub description: String,
    pub image: String,
    /// In submission order.
    pub ratings: Vec<MessRating>,
    pub created_at: DateTime<Utc>,
}

impl Mess {
    pub fn average_rating(&self) -> f64 {
        if self.ratings.is_empty() {
            return 0.0;
        }
        let sum: i64 = self.ratings.iter().map(|r| r.rating as i64).sum();
        sum as f64 / self.ratings.len() as f64
    }

    pub fn total_ratings(&self) -> usize {
        self.ratings.len()
    }

    pub fn rating_by(&self, user_id: Uuid) -> Option<i32> {
        self.ratings
            .iter()
            .find(|r| r.user_id == user_id)
            .map(|r| r.rating)
    }
}

#[derive(Debug, Clone)]
pub struct NewMess {
    pub mess_number: i64,
    pub name: String,
    pub mobile_no: String,
    pub capacity: i32,
    pub address: String,
    pub owner_id: Uuid,
    pub owner_number: i64,
    pub description: String,
    pub image: String,
}

impl NewMess {
    /// The mess every owner account starts with.
    pub fn default_for_owner(owner_id: Uuid, owner_number: i64, now: DateTime<Utc>) -> Self {
        Self {
            mess_number: now.timestamp_millis(),
            name: format!("Mess{}", now.timestamp() % 1000),
            mobile_no: String::new(),
            capacity: 0,
            address: String::new(),
            owner_id,
            owner_number,
            description: String::new(),
            image: DEFAULT_MESS_IMAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MessPatch {
    pub name: Option<String>,
    pub mobile_no: Option<String>,
    pub capacity: Option<i32>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl MessPatch {
    pub fn apply(self, mess: &mut Mess) {
        if let Some(v) = self.name {
            mess.name = v;
        }
        if let Some(v) = self.mobile_no {
            mess.mobile_no = v;
        }
        if let Some(v) = self.capacity {
            mess.capacity = v;
        }
        if let Some(v) = self.address {
            mess.address = v;
        }
        if let Some(v) = self.description {
            mess.description = v;
        }
        if let Some(v) = self.image {
            mess.image = v;
        }
    }
}

pub fn is_valid_rating(rating: i32) -> bool {
    (1..=5).contains(&rating)
}

/// Mean of the per-mess averages, rounded to one decimal place.
pub fn overall_average(messes: &[Mess]) -> f64 {
    if messes.is_empty() {
        return 0.0;
    }
    let total: f64 = messes.iter().map(Mess::average_rating).sum();
    let avg = total / messes.len() as f64;
    (avg * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn mess_with(ratings: &[i32]) -> Mess {
        let now = Utc::now();
        let mut mess = Mess {
            id: Uuid::new_v4(),
            mess_number: 1,
            name: "Golden Mess".into(),
            mobile_no: String::new(),
            capacity: 0,
            address: String::new(),
            owner_id: Uuid::new_v4(),
            owner_number: 1,
            description: String::new(),
            image: DEFAULT_MESS_IMAGE.into(),
            ratings: Vec::new(),
            created_at: now,
        };
        for r in ratings {
            mess.ratings.push(MessRating {
                user_id: Uuid::new_v4(),
                rating: *r,
            });
        }
        mess
    }

    #[test]
    fn average_of_no_ratings_is_zero() {
        assert_eq!(mess_with(&[]).average_rating(), 0.0);
    }

    #[test]
    fn average_is_arithmetic_mean() {
        let mess = mess_with(&[5, 4, 4]);
        assert!((mess.average_rating() - 13.0 / 3.0).abs() < 1e-9);
        assert_eq!(mess.total_ratings(), 3);
    }

    #[test]
    fn overall_average_rounds_to_one_decimal() {
        let messes = vec![mess_with(&[5, 4]), mess_with(&[3]), mess_with(&[])];
        // (4.5 + 3.0 + 0.0) / 3 = 2.5
        assert_eq!(overall_average(&messes), 2.5);
        let messes = vec![mess_with(&[5, 4, 4]), mess_with(&[2])];
        // (4.333.. + 2.0) / 2 = 3.1666..
        assert_eq!(overall_average(&messes), 3.2);
        assert_eq!(overall_average(&[]), 0.0);
    }

    #[test]
    fn rating_bounds() {
        assert!(!is_valid_rating(0));
        assert!(is_valid_rating(1));
        assert!(is_valid_rating(5));
        assert!(!is_valid_rating(6));
    }

    #[test]
    fn default_mess_uses_seconds_suffix() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let owner = Uuid::new_v4();
        let mess = NewMess::default_for_owner(owner, 42, now);
        assert_eq!(mess.name, format!("Mess{}", now.timestamp() % 1000));
        assert_eq!(mess.mess_number, now.timestamp_millis());
        assert_eq!(mess.owner_number, 42);
        assert_eq!(mess.image, DEFAULT_MESS_IMAGE);
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut mess = mess_with(&[]);
        MessPatch {
            capacity: Some(80),
            address: Some("Campus Road".into()),
            ..Default::default()
        }
        .apply(&mut mess);
        assert_eq!(mess.capacity, 80);
        assert_eq!(mess.address, "Campus Road");
        assert_eq!(mess.name, "Golden Mess");
    }
}
