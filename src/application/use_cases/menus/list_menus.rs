use uuid::Uuid;

use crate::application::errors::ServiceResult;
use crate::application::ports::menu_repository::MenuRepository;
use crate::domain::menu::Menu;

pub struct ListMenus<'a, R: MenuRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: MenuRepository + ?Sized> ListMenus<'a, R> {
    pub async fn all(&self) -> ServiceResult<Vec<Menu>> {
        Ok(self.repo.list_all().await?)
    }

    pub async fn by_owner(&self, owner_id: Uuid) -> ServiceResult<Vec<Menu>> {
        Ok(self.repo.list_by_owner(owner_id).await?)
    }

    /// A blank query lists everything the owner serves.
    pub async fn search(&self, owner_id: Uuid, query: Option<&str>) -> ServiceResult<Vec<Menu>> {
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => Ok(self.repo.search_by_owner(owner_id, q).await?),
            None => self.by_owner(owner_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::menu::{Availability, FoodType, NewMenu};
    use crate::testing::MemoryStore;

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let store = MemoryStore::default();
        let owner = Uuid::new_v4();
        for name in ["Paneer Tikka", "Veg Thali", "paneer roll"] {
            store
                .create(&NewMenu {
                    name: name.into(),
                    description: String::new(),
                    price: 50.0,
                    owner_id: owner,
                    availability: Availability::Yes,
                    food_type: FoodType::Veg,
                })
                .await
                .unwrap();
        }
        let uc = ListMenus { repo: &store };
        assert_eq!(uc.search(owner, Some("PANEER")).await.unwrap().len(), 2);
        assert_eq!(uc.search(owner, Some("  ")).await.unwrap().len(), 3);
        assert_eq!(uc.search(owner, None).await.unwrap().len(), 3);
        assert!(uc.by_owner(Uuid::new_v4()).await.unwrap().is_empty());
    }
}
