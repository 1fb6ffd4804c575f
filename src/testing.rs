//! In-memory repositories and context builders for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::application::ports::check_in_repository::CheckInRepository;
use crate::application::ports::feedback_repository::FeedbackRepository;
use crate::application::ports::forum_repository::ForumRepository;
use crate::application::ports::meal_pass_repository::MealPassRepository;
use crate::application::ports::menu_repository::MenuRepository;
use crate::application::ports::mess_repository::MessRepository;
use crate::application::ports::plan_repository::PlanRepository;
use crate::application::ports::prebooking_repository::PrebookingRepository;
use crate::application::ports::subscription_repository::SubscriptionRepository;
use crate::application::ports::user_repository::{ProfileUpdate, UserRepository};
use crate::application::use_cases::auth::passwords::hash_password;
use crate::bootstrap::app_context::{AppContext, AppServices};
use crate::bootstrap::config::Config;
use crate::domain::check_in::{
    CheckIn, CheckInFilter, CheckInStatus, MealTally, MealType, NewCheckIn,
};
use crate::domain::feedback::{Feedback, NewFeedback};
use crate::domain::forum::{ForumPost, PostFilter};
use crate::domain::meal_pass::{MealPass, NewMealPass};
use crate::domain::menu::{Menu, NewMenu};
use crate::domain::mess::{Mess, MessRating, NewMess};
use crate::domain::prebooking::{NewPrebooking, Prebooking, PrebookingStatus};
use crate::domain::subscriptions::{
    NewPlan, NewSubscription, PaymentStatus, SubscriptionPlan, SubscriptionStatus,
    UserSubscription,
};
use crate::domain::users::{LoginRole, NewUser, User};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    messes: Vec<Mess>,
    menus: Vec<Menu>,
    feedback: Vec<Feedback>,
    prebookings: Vec<Prebooking>,
    plans: Vec<SubscriptionPlan>,
    subscriptions: Vec<UserSubscription>,
    passes: Vec<MealPass>,
    check_ins: Vec<CheckIn>,
    posts: Vec<ForumPost>,
}

/// Every repository port backed by vectors behind one lock. Records are kept in
/// insertion order, which tests treat as creation order.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn with<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        let mut guard = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    pub fn subscriptions(&self) -> Vec<UserSubscription> {
        self.with(|t| t.subscriptions.clone())
    }

    pub fn passes(&self) -> Vec<MealPass> {
        self.with(|t| t.passes.clone())
    }

    pub fn update_pass(&self, id: Uuid, f: impl FnOnce(&mut MealPass)) {
        self.with(|t| {
            if let Some(p) = t.passes.iter_mut().find(|p| p.id == id) {
                f(p);
            }
        })
    }

    pub fn update_subscription(&self, id: Uuid, f: impl FnOnce(&mut UserSubscription)) {
        self.with(|t| {
            if let Some(s) = t.subscriptions.iter_mut().find(|s| s.id == id) {
                f(s);
            }
        })
    }

    pub fn backdate_check_in(&self, id: Uuid, at: DateTime<Utc>) {
        self.with(|t| {
            if let Some(c) = t.check_ins.iter_mut().find(|c| c.id == id) {
                c.created_at = at;
                c.served_on = at.date_naive();
            }
        })
    }
}

fn newest_first<T: Clone>(items: impl DoubleEndedIterator<Item = T>) -> Vec<T> {
    items.rev().collect()
}

fn taken(t: &Tables, user: &NewUser) -> bool {
    t.users
        .iter()
        .any(|u| u.username == user.username || u.email == user.email)
}

fn insert_user(t: &mut Tables, user: &NewUser) -> User {
    let row = User {
        id: Uuid::new_v4(),
        username: user.username.clone(),
        email: user.email.clone(),
        password_hash: user.password_hash.clone(),
        login_role: user.login_role,
        user_number: user.user_number,
        created_at: Utc::now(),
    };
    t.users.push(row.clone());
    row
}

/// Stores `mess` under the next free `mess_number` at or above the requested one.
fn insert_mess(t: &mut Tables, mess: &NewMess) -> Mess {
    let mut mess_number = mess.mess_number;
    while t.messes.iter().any(|m| m.mess_number == mess_number) {
        mess_number += 1;
    }
    let row = Mess {
        id: Uuid::new_v4(),
        mess_number,
        name: mess.name.clone(),
        mobile_no: mess.mobile_no.clone(),
        capacity: mess.capacity,
        address: mess.address.clone(),
        owner_id: mess.owner_id,
        owner_number: mess.owner_number,
        description: mess.description.clone(),
        image: mess.image.clone(),
        ratings: Vec::new(),
        created_at: Utc::now(),
    };
    t.messes.push(row.clone());
    row
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> anyhow::Result<Option<User>> {
        Ok(self.with(|t| (!taken(t, user)).then(|| insert_user(t, user))))
    }

    async fn create_owner(
        &self,
        user: &NewUser,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<(User, Mess)>> {
        Ok(self.with(|t| {
            if taken(t, user) {
                return None;
            }
            let owner = insert_user(t, user);
            let mess = insert_mess(
                t,
                &NewMess::default_for_owner(owner.id, owner.user_number, now),
            );
            Some((owner, mess))
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.with(|t| t.users.iter().find(|u| u.id == id).cloned()))
    }

    async fn find_by_user_number(&self, user_number: i64) -> anyhow::Result<Option<User>> {
        Ok(self.with(|t| t.users.iter().find(|u| u.user_number == user_number).cloned()))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.with(|t| t.users.iter().find(|u| u.email == email).cloned()))
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        Ok(self.with(|t| t.users.iter().find(|u| u.username == username).cloned()))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        username: &str,
        email: &str,
    ) -> anyhow::Result<ProfileUpdate> {
        Ok(self.with(|t| {
            if t
                .users
                .iter()
                .any(|u| u.id != id && (u.username == username || u.email == email))
            {
                return ProfileUpdate::Taken;
            }
            match t.users.iter_mut().find(|u| u.id == id) {
                Some(u) => {
                    u.username = username.to_string();
                    u.email = email.to_string();
                    ProfileUpdate::Updated(u.clone())
                }
                None => ProfileUpdate::Missing,
            }
        }))
    }

    async fn delete_user(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.with(|t| {
            let before = t.users.len();
            t.users.retain(|u| u.id != id);
            t.messes.retain(|m| m.owner_id != id);
            t.users.len() != before
        }))
    }
}

/// Wraps a store so the next `misses` email or username lookups report no
/// match, as when another request inserts the row right after the check.
pub struct StaleLookups<'a> {
    store: &'a MemoryStore,
    misses: AtomicUsize,
}

impl<'a> StaleLookups<'a> {
    pub fn new(store: &'a MemoryStore, misses: usize) -> Self {
        Self {
            store,
            misses: AtomicUsize::new(misses),
        }
    }

    fn stale(&self) -> bool {
        self.misses
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl UserRepository for StaleLookups<'_> {
    async fn create_user(&self, user: &NewUser) -> anyhow::Result<Option<User>> {
        UserRepository::create_user(self.store, user).await
    }

    async fn create_owner(
        &self,
        user: &NewUser,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<(User, Mess)>> {
        UserRepository::create_owner(self.store, user, now).await
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        UserRepository::find_by_id(self.store, id).await
    }

    async fn find_by_user_number(&self, user_number: i64) -> anyhow::Result<Option<User>> {
        UserRepository::find_by_user_number(self.store, user_number).await
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        if self.stale() {
            return Ok(None);
        }
        UserRepository::find_by_email(self.store, email).await
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        if self.stale() {
            return Ok(None);
        }
        UserRepository::find_by_username(self.store, username).await
    }

    async fn update_profile(
        &self,
        id: Uuid,
        username: &str,
        email: &str,
    ) -> anyhow::Result<ProfileUpdate> {
        UserRepository::update_profile(self.store, id, username, email).await
    }

    async fn delete_user(&self, id: Uuid) -> anyhow::Result<bool> {
        UserRepository::delete_user(self.store, id).await
    }
}

#[async_trait]
impl MessRepository for MemoryStore {
    async fn create(&self, mess: &NewMess) -> anyhow::Result<Mess> {
        Ok(self.with(|t| insert_mess(t, mess)))
    }

    async fn list(&self, limit: i64) -> anyhow::Result<Vec<Mess>> {
        Ok(self.with(|t| {
            t.messes
                .iter()
                .take(limit.max(0) as usize)
                .cloned()
                .collect()
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Mess>> {
        Ok(self.with(|t| t.messes.iter().find(|m| m.id == id).cloned()))
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Option<Mess>> {
        Ok(self.with(|t| t.messes.iter().find(|m| m.owner_id == owner_id).cloned()))
    }

    async fn save(&self, mess: &Mess) -> anyhow::Result<Mess> {
        self.with(|t| {
            let row = t
                .messes
                .iter_mut()
                .find(|m| m.id == mess.id)
                .ok_or_else(|| anyhow::anyhow!("mess vanished"))?;
            let ratings = std::mem::take(&mut row.ratings);
            *row = mess.clone();
            row.ratings = ratings;
            Ok(row.clone())
        })
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.with(|t| {
            let before = t.messes.len();
            t.messes.retain(|m| m.id != id);
            t.messes.len() != before
        }))
    }

    async fn add_rating(&self, mess_id: Uuid, user_id: Uuid, rating: i32) -> anyhow::Result<bool> {
        self.with(|t| {
            let mess = t
                .messes
                .iter_mut()
                .find(|m| m.id == mess_id)
                .ok_or_else(|| anyhow::anyhow!("mess vanished"))?;
            if mess.rating_by(user_id).is_some() {
                return Ok(false);
            }
            mess.ratings.push(MessRating { user_id, rating });
            Ok(true)
        })
    }
}

#[async_trait]
impl MenuRepository for MemoryStore {
    async fn create(&self, menu: &NewMenu) -> anyhow::Result<Menu> {
        Ok(self.with(|t| {
            let row = Menu {
                id: Uuid::new_v4(),
                name: menu.name.clone(),
                description: menu.description.clone(),
                price: menu.price,
                owner_id: menu.owner_id,
                availability: menu.availability,
                food_type: menu.food_type,
                date: Utc::now(),
            };
            t.menus.push(row.clone());
            row
        }))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Menu>> {
        Ok(self.with(|t| t.menus.clone()))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Menu>> {
        Ok(self.with(|t| {
            t.menus
                .iter()
                .filter(|m| m.owner_id == owner_id)
                .cloned()
                .collect()
        }))
    }

    async fn search_by_owner(&self, owner_id: Uuid, query: &str) -> anyhow::Result<Vec<Menu>> {
        let needle = query.to_lowercase();
        Ok(self.with(|t| {
            t.menus
                .iter()
                .filter(|m| m.owner_id == owner_id && m.name.to_lowercase().contains(&needle))
                .cloned()
                .collect()
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Menu>> {
        Ok(self.with(|t| t.menus.iter().find(|m| m.id == id).cloned()))
    }

    async fn save(&self, menu: &Menu) -> anyhow::Result<Menu> {
        self.with(|t| {
            let row = t
                .menus
                .iter_mut()
                .find(|m| m.id == menu.id)
                .ok_or_else(|| anyhow::anyhow!("menu vanished"))?;
            *row = menu.clone();
            Ok(row.clone())
        })
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.with(|t| {
            let before = t.menus.len();
            t.menus.retain(|m| m.id != id);
            t.menus.len() != before
        }))
    }
}

#[async_trait]
impl FeedbackRepository for MemoryStore {
    async fn create(&self, feedback: &NewFeedback) -> anyhow::Result<Feedback> {
        Ok(self.with(|t| {
            let row = Feedback {
                id: Uuid::new_v4(),
                user_id: feedback.user_id,
                comments: feedback.comments.clone(),
                rating: feedback.rating,
                submitted_at: Utc::now(),
            };
            t.feedback.push(row.clone());
            row
        }))
    }

    async fn list(&self) -> anyhow::Result<Vec<Feedback>> {
        Ok(self.with(|t| newest_first(t.feedback.iter().cloned())))
    }
}

#[async_trait]
impl PrebookingRepository for MemoryStore {
    async fn create(&self, prebooking: &NewPrebooking) -> anyhow::Result<Prebooking> {
        Ok(self.with(|t| {
            let now = Utc::now();
            let row = Prebooking {
                id: Uuid::new_v4(),
                menu_id: prebooking.menu_id,
                mess_id: prebooking.mess_id,
                user_id: prebooking.user_id,
                date: prebooking.date.clone(),
                time: prebooking.time.clone(),
                quantity: prebooking.quantity,
                status: PrebookingStatus::Pending,
                created_at: now,
                updated_at: now,
            };
            t.prebookings.push(row.clone());
            row
        }))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Prebooking>> {
        Ok(self.with(|t| t.prebookings.clone()))
    }

    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Prebooking>> {
        Ok(self.with(|t| {
            t.prebookings
                .iter()
                .filter(|p| p.user_id == user_id)
                .cloned()
                .collect()
        }))
    }

    async fn list_by_mess(&self, mess_id: Uuid) -> anyhow::Result<Vec<Prebooking>> {
        Ok(self.with(|t| {
            t.prebookings
                .iter()
                .filter(|p| p.mess_id == mess_id)
                .cloned()
                .collect()
        }))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: PrebookingStatus,
    ) -> anyhow::Result<Option<Prebooking>> {
        Ok(self.with(|t| {
            t.prebookings.iter_mut().find(|p| p.id == id).map(|p| {
                p.status = status;
                p.updated_at = Utc::now();
                p.clone()
            })
        }))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.with(|t| {
            let before = t.prebookings.len();
            t.prebookings.retain(|p| p.id != id);
            t.prebookings.len() != before
        }))
    }
}

#[async_trait]
impl PlanRepository for MemoryStore {
    async fn create(&self, plan: &NewPlan) -> anyhow::Result<SubscriptionPlan> {
        Ok(self.with(|t| {
            let now = Utc::now();
            let row = SubscriptionPlan {
                id: Uuid::new_v4(),
                owner_id: plan.owner_id,
                plan_name: plan.plan_name.clone(),
                duration: plan.duration,
                meal_type: plan.meal_type,
                price: plan.price,
                description: plan.description.clone(),
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            t.plans.push(row.clone());
            row
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<SubscriptionPlan>> {
        Ok(self.with(|t| t.plans.iter().find(|p| p.id == id).cloned()))
    }

    async fn save(&self, plan: &SubscriptionPlan) -> anyhow::Result<SubscriptionPlan> {
        self.with(|t| {
            let row = t
                .plans
                .iter_mut()
                .find(|p| p.id == plan.id)
                .ok_or_else(|| anyhow::anyhow!("plan vanished"))?;
            *row = plan.clone();
            Ok(row.clone())
        })
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.with(|t| {
            let before = t.plans.len();
            t.plans.retain(|p| p.id != id);
            t.plans.len() != before
        }))
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        active_only: bool,
    ) -> anyhow::Result<Vec<SubscriptionPlan>> {
        Ok(self.with(|t| {
            t.plans
                .iter()
                .filter(|p| p.owner_id == owner_id && (!active_only || p.is_active))
                .cloned()
                .collect()
        }))
    }

    async fn list_active(&self) -> anyhow::Result<Vec<SubscriptionPlan>> {
        Ok(self.with(|t| newest_first(t.plans.iter().filter(|p| p.is_active).cloned())))
    }
}

#[async_trait]
impl SubscriptionRepository for MemoryStore {
    async fn create(
        &self,
        subscription: &NewSubscription,
    ) -> anyhow::Result<Option<UserSubscription>> {
        Ok(self.with(|t| {
            if t
                .subscriptions
                .iter()
                .any(|s| s.user_id == subscription.user_id && s.plan_id == subscription.plan_id)
            {
                return None;
            }
            let now = Utc::now();
            let row = UserSubscription {
                id: Uuid::new_v4(),
                user_id: subscription.user_id,
                plan_id: subscription.plan_id,
                start_date: subscription.start_date,
                end_date: subscription.end_date,
                status: SubscriptionStatus::Pending,
                payment_id: None,
                payment_status: PaymentStatus::Pending,
                cancellation_reason: None,
                created_at: now,
                updated_at: now,
            };
            t.subscriptions.push(row.clone());
            Some(row)
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserSubscription>> {
        Ok(self.with(|t| t.subscriptions.iter().find(|s| s.id == id).cloned()))
    }

    async fn exists_for(&self, user_id: Uuid, plan_id: Uuid) -> anyhow::Result<bool> {
        Ok(self.with(|t| {
            t.subscriptions
                .iter()
                .any(|s| s.user_id == user_id && s.plan_id == plan_id)
        }))
    }

    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<UserSubscription>> {
        Ok(self.with(|t| {
            newest_first(
                t.subscriptions
                    .iter()
                    .filter(|s| s.user_id == user_id)
                    .cloned(),
            )
        }))
    }

    async fn list_by_plans(&self, plan_ids: &[Uuid]) -> anyhow::Result<Vec<UserSubscription>> {
        Ok(self.with(|t| {
            newest_first(
                t.subscriptions
                    .iter()
                    .filter(|s| plan_ids.contains(&s.plan_id))
                    .cloned(),
            )
        }))
    }

    async fn save(&self, subscription: &UserSubscription) -> anyhow::Result<UserSubscription> {
        self.with(|t| {
            let row = t
                .subscriptions
                .iter_mut()
                .find(|s| s.id == subscription.id)
                .ok_or_else(|| anyhow::anyhow!("subscription vanished"))?;
            *row = subscription.clone();
            Ok(row.clone())
        })
    }

    async fn mark_plan_removed(
        &self,
        plan_id: Uuid,
        reason: &str,
        at: DateTime<Utc>,
    ) -> anyhow::Result<u64> {
        Ok(self.with(|t| {
            let mut n = 0;
            for s in t.subscriptions.iter_mut().filter(|s| s.plan_id == plan_id) {
                s.status = SubscriptionStatus::PlanRemoved;
                s.end_date = at;
                s.cancellation_reason = Some(reason.to_string());
                s.updated_at = at;
                n += 1;
            }
            n
        }))
    }
}

#[async_trait]
impl MealPassRepository for MemoryStore {
    async fn create(&self, pass: &NewMealPass) -> anyhow::Result<MealPass> {
        self.with(|t| {
            if t.passes.iter().any(|p| p.qr_code == pass.qr_code) {
                anyhow::bail!("duplicate qr code");
            }
            let now = Utc::now();
            let row = MealPass {
                id: Uuid::new_v4(),
                user_id: pass.user_id,
                subscription_id: pass.subscription_id,
                owner_id: pass.owner_id,
                qr_code: pass.qr_code.clone(),
                is_active: true,
                is_blocked: false,
                block_reason: None,
                valid_from: Some(pass.valid_from),
                valid_till: Some(pass.valid_till),
                created_at: now,
                updated_at: now,
            };
            t.passes.push(row.clone());
            Ok(row)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<MealPass>> {
        Ok(self.with(|t| t.passes.iter().find(|p| p.id == id).cloned()))
    }

    async fn find_by_qr_code(&self, qr_code: &str) -> anyhow::Result<Option<MealPass>> {
        Ok(self.with(|t| t.passes.iter().find(|p| p.qr_code == qr_code).cloned()))
    }

    async fn list_current(&self, user_id: Uuid, now: DateTime<Utc>) -> anyhow::Result<Vec<MealPass>> {
        Ok(self.with(|t| {
            t.passes
                .iter()
                .filter(|p| {
                    p.user_id == user_id && p.is_active && p.valid_till.is_some_and(|v| v > now)
                })
                .cloned()
                .collect()
        }))
    }
}

#[async_trait]
impl CheckInRepository for MemoryStore {
    async fn create(&self, check_in: &NewCheckIn) -> anyhow::Result<Option<CheckIn>> {
        Ok(self.with(|t| {
            if t.check_ins.iter().any(|c| {
                c.meal_pass_id == check_in.meal_pass_id
                    && c.meal_type == check_in.meal_type
                    && c.served_on == check_in.served_on
            }) {
                return None;
            }
            let now = Utc::now();
            let row = CheckIn {
                id: Uuid::new_v4(),
                user_id: check_in.user_id,
                mess_id: check_in.mess_id,
                meal_pass_id: check_in.meal_pass_id,
                meal_type: check_in.meal_type,
                status: CheckInStatus::Success,
                failure_reason: None,
                served_on: check_in.served_on,
                created_at: now,
                updated_at: now,
            };
            t.check_ins.push(row.clone());
            Some(row)
        }))
    }

    async fn exists_for_day(
        &self,
        meal_pass_id: Uuid,
        meal_type: MealType,
        day: NaiveDate,
    ) -> anyhow::Result<bool> {
        Ok(self.with(|t| {
            t.check_ins.iter().any(|c| {
                c.meal_pass_id == meal_pass_id && c.meal_type == meal_type && c.served_on == day
            })
        }))
    }

    async fn list(&self, mess_id: Uuid, filter: &CheckInFilter) -> anyhow::Result<Vec<CheckIn>> {
        Ok(self.with(|t| {
            newest_first(
                t.check_ins
                    .iter()
                    .filter(|c| c.mess_id == mess_id && filter.matches(c))
                    .cloned(),
            )
        }))
    }

    async fn tally_successful(&self, mess_id: Uuid, day: NaiveDate) -> anyhow::Result<MealTally> {
        Ok(self.with(|t| {
            let mut tally = MealTally::default();
            for c in t.check_ins.iter().filter(|c| {
                c.mess_id == mess_id && c.served_on == day && c.status == CheckInStatus::Success
            }) {
                tally.add(c.meal_type, 1);
            }
            tally
        }))
    }
}

#[async_trait]
impl ForumRepository for MemoryStore {
    async fn insert(&self, post: &ForumPost) -> anyhow::Result<()> {
        self.with(|t| t.posts.push(post.clone()));
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<ForumPost>> {
        Ok(self.with(|t| t.posts.iter().find(|p| p.id == id).cloned()))
    }

    async fn save(&self, post: &ForumPost) -> anyhow::Result<()> {
        self.with(|t| {
            let row = t
                .posts
                .iter_mut()
                .find(|p| p.id == post.id)
                .ok_or_else(|| anyhow::anyhow!("post vanished"))?;
            *row = post.clone();
            Ok(())
        })
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.with(|t| {
            let before = t.posts.len();
            t.posts.retain(|p| p.id != id);
            t.posts.len() != before
        }))
    }

    async fn list(
        &self,
        filter: &PostFilter,
        offset: i64,
        limit: i64,
    ) -> anyhow::Result<(Vec<ForumPost>, i64)> {
        Ok(self.with(|t| {
            let matching = newest_first(t.posts.iter().filter(|p| filter.matches(p)).cloned());
            let total = matching.len() as i64;
            let page = matching
                .into_iter()
                .skip(offset.max(0) as usize)
                .take(limit.max(0) as usize)
                .collect();
            (page, total)
        }))
    }
}

/// Creates a user whose password is `secret123` and email `<username>@mess.in`.
pub async fn seed_user(store: &MemoryStore, username: &str, role: LoginRole) -> User {
    let hash = hash_password("secret123").expect("hash");
    UserRepository::create_user(
        store,
        &NewUser {
            username: username.to_string(),
            email: format!("{username}@mess.in"),
            password_hash: hash,
            login_role: role,
            user_number: Utc::now().timestamp_nanos_opt().unwrap_or_default(),
        },
    )
    .await
    .expect("seed user")
    .expect("seeded username is free")
}

pub async fn seed_mess(store: &MemoryStore, owner: &User, name: &str) -> Mess {
    let mut new = NewMess::default_for_owner(owner.id, owner.user_number, Utc::now());
    new.name = name.to_string();
    MessRepository::create(store, &new).await.expect("seed mess")
}

pub fn test_config() -> Config {
    Config {
        api_port: 0,
        cors_origins: vec!["http://localhost:5173".into()],
        database_url: "postgres://unused".into(),
        database_max_connections: 1,
        jwt_secret: "test-secret-that-is-long-enough".into(),
        jwt_expires_secs: 3600,
        cookie_secure: false,
        is_production: false,
    }
}

pub fn test_context(store: Arc<MemoryStore>) -> AppContext {
    let services = AppServices::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store,
    );
    AppContext::new(test_config(), services)
}
