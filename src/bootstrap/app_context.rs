use std::sync::Arc;

use crate::application::ports::check_in_repository::CheckInRepository;
use crate::application::ports::feedback_repository::FeedbackRepository;
use crate::application::ports::forum_repository::ForumRepository;
use crate::application::ports::meal_pass_repository::MealPassRepository;
use crate::application::ports::menu_repository::MenuRepository;
use crate::application::ports::mess_repository::MessRepository;
use crate::application::ports::plan_repository::PlanRepository;
use crate::application::ports::prebooking_repository::PrebookingRepository;
use crate::application::ports::subscription_repository::SubscriptionRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    mess_repo: Arc<dyn MessRepository>,
    menu_repo: Arc<dyn MenuRepository>,
    feedback_repo: Arc<dyn FeedbackRepository>,
    prebooking_repo: Arc<dyn PrebookingRepository>,
    plan_repo: Arc<dyn PlanRepository>,
    subscription_repo: Arc<dyn SubscriptionRepository>,
    meal_pass_repo: Arc<dyn MealPassRepository>,
    check_in_repo: Arc<dyn CheckInRepository>,
    forum_repo: Arc<dyn ForumRepository>,
}

impl AppServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        mess_repo: Arc<dyn MessRepository>,
        menu_repo: Arc<dyn MenuRepository>,
        feedback_repo: Arc<dyn FeedbackRepository>,
        prebooking_repo: Arc<dyn PrebookingRepository>,
        plan_repo: Arc<dyn PlanRepository>,
        subscription_repo: Arc<dyn SubscriptionRepository>,
        meal_pass_repo: Arc<dyn MealPassRepository>,
        check_in_repo: Arc<dyn CheckInRepository>,
        forum_repo: Arc<dyn ForumRepository>,
    ) -> Self {
        Self {
            user_repo,
            mess_repo,
            menu_repo,
            feedback_repo,
            prebooking_repo,
            plan_repo,
            subscription_repo,
            meal_pass_repo,
            check_in_repo,
            forum_repo,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn mess_repo(&self) -> Arc<dyn MessRepository> {
        self.services.mess_repo.clone()
    }

    pub fn menu_repo(&self) -> Arc<dyn MenuRepository> {
        self.services.menu_repo.clone()
    }

    pub fn feedback_repo(&self) -> Arc<dyn FeedbackRepository> {
        self.services.feedback_repo.clone()
    }

    pub fn prebooking_repo(&self) -> Arc<dyn PrebookingRepository> {
        self.services.prebooking_repo.clone()
    }

    pub fn plan_repo(&self) -> Arc<dyn PlanRepository> {
        self.services.plan_repo.clone()
    }

    pub fn subscription_repo(&self) -> Arc<dyn SubscriptionRepository> {
        self.services.subscription_repo.clone()
    }

    pub fn meal_pass_repo(&self) -> Arc<dyn MealPassRepository> {
        self.services.meal_pass_repo.clone()
    }

    pub fn check_in_repo(&self) -> Arc<dyn CheckInRepository> {
        self.services.check_in_repo.clone()
    }

    pub fn forum_repo(&self) -> Arc<dyn ForumRepository> {
        self.services.forum_repo.clone()
    }
}
