//! Event sub-formats ("Welcome drink", "Банкет") and their registry.

use serde::{Deserialize, Serialize};

use crate::domain::dish::DishKey;

/// The two mutually exclusive service groups a proposal can belong to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ServiceGroup {
    /// Boxed delivery without on-site staff.
    #[serde(rename = "box")]
    BoxDelivery,
    /// Full catering service.
    #[serde(rename = "catering")]
    Catering,
}

/// A named sub-phase of the event with its own guests, timing, and dishes.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct EventFormat {
    /// Dense local id, re-sequenced to 0..n-1 on deletion.
    pub id: usize,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub time_window: String,
    #[serde(default)]
    pub guest_count: i32,
    #[serde(default)]
    pub group: Option<ServiceGroup>,
    /// Ordered dish selection specific to this format.
    #[serde(default)]
    pub dishes: Vec<DishKey>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct EventFormatRegistry {
    #[serde(default)]
    formats: Vec<EventFormat>,
}

impl EventFormatRegistry {
    /// Creates a format and returns its id.
    pub fn create<S: Into<String>>(&mut self, name: S) -> usize {
        let id = self.formats.len();
        self.formats.push(EventFormat {
            id,
            name: name.into(),
            ..EventFormat::default()
        });
        id
    }

    pub fn formats(&self) -> &[EventFormat] {
        &self.formats
    }

    pub fn get(&self, id: usize) -> Option<&EventFormat> {
        self.formats.get(id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut EventFormat> {
        self.formats.get_mut(id)
    }

    pub fn rename<S: Into<String>>(&mut self, id: usize, name: S) {
        if let Some(format) = self.formats.get_mut(id) {
            format.name = name.into();
        }
    }

    pub fn set_time_window<S: Into<String>>(&mut self, id: usize, window: S) {
        if let Some(format) = self.formats.get_mut(id) {
            format.time_window = window.into();
        }
    }

    pub fn set_guest_count(&mut self, id: usize, guest_count: i32) {
        if let Some(format) = self.formats.get_mut(id) {
            format.guest_count = guest_count;
        }
    }

    pub fn set_group(&mut self, id: usize, group: Option<ServiceGroup>) {
        if let Some(format) = self.formats.get_mut(id) {
            format.group = group;
        }
    }

    /// Adds a dish to the format's selection, keeping it unique.
    pub fn add_dish(&mut self, id: usize, dish: DishKey) {
        if let Some(format) = self.formats.get_mut(id)
            && !format.dishes.contains(&dish)
        {
            format.dishes.push(dish);
        }
    }

    pub fn remove_dish(&mut self, id: usize, dish: DishKey) {
        if let Some(format) = self.formats.get_mut(id) {
            format.dishes.retain(|key| *key != dish);
        }
    }

    /// Drops a dish from every format's selection (after ledger removal).
    pub fn remove_dish_everywhere(&mut self, dish: DishKey) {
        for format in &mut self.formats {
            format.dishes.retain(|key| *key != dish);
        }
    }

    /// Deletes a format and re-sequences the remaining ids to stay dense.
    pub fn delete(&mut self, id: usize) {
        if id < self.formats.len() {
            self.formats.remove(id);
            for (index, format) in self.formats.iter_mut().enumerate() {
                format.id = index;
            }
        }
    }

    /// Aligns formats with a newly chosen proposal-level group: formats
    /// tagged with the other group are dropped, untagged formats adopt the
    /// new group.
    pub fn reconcile_group(&mut self, group: ServiceGroup) {
        self.formats
            .retain(|format| format.group.is_none_or(|g| g == group));
        for (index, format) in self.formats.iter_mut().enumerate() {
            format.id = index;
            format.group = Some(group);
        }
    }

    /// Guest total for the weight/volume display context: the **sum** over
    /// formats. Deliberately differs from [`Self::guests_for_pricing`]; the
    /// two policies are kept apart on purpose, see DESIGN.md.
    pub fn guests_for_weight(&self) -> i32 {
        self.formats
            .iter()
            .map(|format| format.guest_count.max(0))
            .sum()
    }

    /// Guest fallback for the per-person pricing context: the **max** over
    /// formats.
    pub fn guests_for_pricing(&self) -> i32 {
        self.formats
            .iter()
            .map(|format| format.guest_count.max(0))
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dish::LocalDishId;
    use crate::domain::types::CatalogDishId;

    fn dish(raw: i32) -> DishKey {
        DishKey::Catalog(CatalogDishId::new(raw).unwrap())
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let mut registry = EventFormatRegistry::default();
        assert_eq!(registry.create("Welcome drink"), 0);
        assert_eq!(registry.create("Банкет"), 1);
        assert_eq!(registry.create("Фуршет"), 2);
    }

    #[test]
    fn delete_resequences_remaining_ids() {
        let mut registry = EventFormatRegistry::default();
        registry.create("A");
        registry.create("B");
        registry.create("C");
        registry.delete(1);
        let ids: Vec<usize> = registry.formats().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(registry.get(1).unwrap().name, "C");
    }

    #[test]
    fn dish_selection_stays_unique() {
        let mut registry = EventFormatRegistry::default();
        let id = registry.create("Банкет");
        registry.add_dish(id, dish(5));
        registry.add_dish(id, dish(5));
        registry.add_dish(id, DishKey::Custom(LocalDishId::new(-1)));
        assert_eq!(registry.get(id).unwrap().dishes.len(), 2);
        registry.remove_dish(id, dish(5));
        assert_eq!(registry.get(id).unwrap().dishes.len(), 1);
    }

    #[test]
    fn sum_and_max_guest_policies_differ() {
        let mut registry = EventFormatRegistry::default();
        let a = registry.create("Welcome drink");
        let b = registry.create("Банкет");
        registry.set_guest_count(a, 30);
        registry.set_guest_count(b, 20);
        assert_eq!(registry.guests_for_weight(), 50);
        assert_eq!(registry.guests_for_pricing(), 30);
    }

    #[test]
    fn reconcile_group_filters_and_relabels() {
        let mut registry = EventFormatRegistry::default();
        let a = registry.create("Бокс-завтрак");
        let b = registry.create("Банкет");
        registry.create("Без группы");
        registry.set_group(a, Some(ServiceGroup::BoxDelivery));
        registry.set_group(b, Some(ServiceGroup::Catering));

        registry.reconcile_group(ServiceGroup::Catering);

        assert_eq!(registry.formats().len(), 2);
        assert!(
            registry
                .formats()
                .iter()
                .all(|f| f.group == Some(ServiceGroup::Catering))
        );
        let ids: Vec<usize> = registry.formats().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
