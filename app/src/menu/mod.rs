use anyhow::Result;

use infra::ids::Id;

use crate::services::{Queryable, Request};

mod models;

pub use self::models::{Category, DietFilter, DietFilterParseError, MenuItem};

/// The fixed catalog: every orderable item, in display order.
#[derive(Debug, Clone)]
pub struct Menu {
    items: Vec<MenuItem>,
}

/// List the whole catalog.
#[derive(Debug, Clone, Copy)]
pub struct ShowMenu;

/// Look a single item up by id.
#[derive(Debug, Clone, Copy)]
pub struct FindItem(pub Id<MenuItem>);

impl Menu {
    pub fn new() -> Self {
        let items = catalog();
        for (nth, item) in items.iter().enumerate() {
            let dups = items.iter().skip(nth + 1).filter(|i| i.id == item.id);
            assert_eq!(dups.count(), 0, "duplicate catalog id: {}", item.id);
        }
        Menu { items }
    }

    pub fn item(&self, id: Id<MenuItem>) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn in_category<'a>(&'a self, category: Category) -> impl Iterator<Item = &'a MenuItem> {
        self.items.iter().filter(move |i| i.category == category)
    }

    /// Items admitted by the dietary filter whose name or description
    /// contains `search`, case-insensitively. An empty search matches all.
    pub fn filtered<'a>(&'a self, diet: DietFilter, search: &str) -> Vec<&'a MenuItem> {
        let needle = search.to_lowercase();
        self.items
            .iter()
            .filter(|item| diet.admits(item))
            .filter(|item| {
                needle.is_empty()
                    || item.name.to_lowercase().contains(&needle)
                    || item.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

impl Request for ShowMenu {
    type Resp = Vec<MenuItem>;
}

impl Queryable<ShowMenu> for Menu {
    fn query(&self, _: ShowMenu) -> Result<Vec<MenuItem>> {
        Ok(self.items.clone())
    }
}

impl Request for FindItem {
    type Resp = Option<MenuItem>;
}

impl Queryable<FindItem> for Menu {
    fn query(&self, req: FindItem) -> Result<Option<MenuItem>> {
        let FindItem(id) = req;
        Ok(self.item(id).cloned())
    }
}

fn catalog() -> Vec<MenuItem> {
    vec![
        item(1, Category::Snacks, "Crispy Samosa", "Potato & pea stuffed pastry", 30, "samosa", true),
        item(2, Category::Snacks, "Veg Sandwich", "Grilled veggies & cheese", 50, "sandwich", true),
        item(3, Category::MainCourse, "Chicken Curry", "Spicy curry with steamed rice", 120, "chicken-curry", false),
        item(4, Category::MainCourse, "Paneer Butter Masala", "Creamy cottage cheese curry", 110, "paneer-masala", true),
        item(5, Category::Beverages, "Masala Chai", "Hot spiced Indian tea", 20, "masala-chai", true),
        item(6, Category::Beverages, "Cold Coffee", "Iced sweetened coffee", 40, "cold-coffee", true),
        item(7, Category::Snacks, "French Fries", "Crispy potato fries with ketchup", 60, "french-fries", true),
        item(8, Category::MainCourse, "Veg Biryani", "Fragrant rice with mixed vegetables", 100, "veg-biryani", true),
        item(9, Category::Beverages, "Fresh Lime Soda", "Refreshing lime soda with mint", 35, "lime-soda", true),
        item(10, Category::Snacks, "Spring Rolls", "Crispy vegetable filled rolls", 45, "spring-rolls", true),
        item(11, Category::MainCourse, "Butter Chicken", "Creamy tomato chicken curry", 130, "butter-chicken", false),
        item(12, Category::Beverages, "Mango Shake", "Fresh mango milkshake", 50, "mango-shake", true),
    ]
}

fn item(
    id: i64,
    category: Category,
    name: &str,
    description: &str,
    price: u64,
    image: &str,
    veg: bool,
) -> MenuItem {
    MenuItem {
        id: Id::from(id),
        category,
        name: name.to_string(),
        description: description.to_string(),
        price,
        image: image.to_string(),
        veg,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use maplit::hashset;
    use std::collections::HashSet;

    #[test]
    fn finds_item_by_id() {
        let menu = Menu::new();

        let found = menu.item(Id::from(5)).expect("item 5");

        assert_eq!(found.name, "Masala Chai");
        assert_eq!(found.price, 20);
    }

    #[test]
    fn missing_id_yields_none() {
        let menu = Menu::new();

        assert_eq!(menu.item(Id::from(999)), None);
    }

    #[test]
    fn every_category_has_items() {
        let menu = Menu::new();

        for cat in &Category::ALL {
            assert_eq!(menu.in_category(*cat).count(), 4, "category: {}", cat);
        }
    }

    #[test]
    fn veg_filter_excludes_the_meat_dishes() {
        let menu = Menu::new();

        let nonveg: HashSet<_> = menu
            .filtered(DietFilter::NonVeg, "")
            .into_iter()
            .map(|item| item.id)
            .collect();

        assert_eq!(nonveg, hashset![Id::from(3), Id::from(11)]);
        assert_eq!(menu.filtered(DietFilter::Veg, "").len(), 10);
        assert_eq!(menu.filtered(DietFilter::All, "").len(), 12);
    }

    #[test]
    fn search_matches_name_and_description() {
        let menu = Menu::new();

        let hits: HashSet<_> = menu
            .filtered(DietFilter::All, "CURRY")
            .into_iter()
            .map(|item| item.id)
            .collect();

        // "Chicken Curry" by name, the other two by description.
        assert_eq!(hits, hashset![Id::from(3), Id::from(4), Id::from(11)]);
    }

    #[test]
    fn show_menu_query_lists_the_catalog() {
        let menu = Menu::new();

        let listed = menu.query(ShowMenu).expect("query");

        assert_eq!(listed.len(), 12);
        assert_eq!(listed, menu.items());
    }

    #[test]
    fn find_item_query_copies_the_item() {
        let menu = Menu::new();

        let found = menu.query(FindItem(Id::from(1))).expect("query");

        assert_eq!(found.as_ref().map(|i| i.name.as_str()), Some("Crispy Samosa"));
        assert_eq!(menu.query(FindItem(Id::from(0))).expect("query"), None);
    }
}
