use chrono::{DateTime, Utc};
use uuid::Uuid;

string_enum!(Availability, "availability" {
    Yes => "Yes",
    No => "No",
});

string_enum!(FoodType, "food type" {
    Veg => "Veg",
    NonVeg => "Non-Veg",
});

#[derive(Debug, Clone)]
pub struct Menu {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub owner_id: Uuid,
    pub availability: Availability,
    pub food_type: FoodType,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMenu {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub owner_id: Uuid,
    pub availability: Availability,
    pub food_type: FoodType,
}

#[derive(Debug, Clone, Default)]
pub struct MenuPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub availability: Option<Availability>,
    pub food_type: Option<FoodType>,
}

impl MenuPatch {
    pub fn apply(self, menu: &mut Menu) {
        if let Some(v) = self.name {
            menu.name = v;
        }
        if let Some(v) = self.description {
            menu.description = v;
        }
        if let Some(v) = self.price {
            menu.price = v;
        }
        if let Some(v) = self.availability {
            menu.availability = v;
        }
        if let Some(v) = self.food_type {
            menu.food_type = v;
        }
    }
}
