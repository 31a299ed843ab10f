use crate::domain::entities::TentativeEntity;
use crate::domain::value_objects::EntityId;
use std::collections::{BTreeMap, HashMap};

/// 項目ごとの現在値。項目 ID 一件につき最大一レコード。
#[derive(Debug, Clone, Default)]
pub struct TentativeStore {
    entities: HashMap<EntityId, TentativeEntity>,
}

impl TentativeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity_id: &str) -> Option<&TentativeEntity> {
        self.entities.get(entity_id)
    }

    pub fn get_mut(&mut self, entity_id: &str) -> Option<&mut TentativeEntity> {
        self.entities.get_mut(entity_id)
    }

    pub fn insert(&mut self, entity_id: EntityId, entity: TentativeEntity) {
        self.entities.insert(entity_id, entity);
    }

    pub fn remove(&mut self, entity_id: &str) -> Option<TentativeEntity> {
        self.entities.remove(entity_id)
    }

    pub fn snapshot(&self) -> BTreeMap<EntityId, TentativeEntity> {
        self.entities
            .iter()
            .map(|(id, entity)| (id.clone(), entity.clone()))
            .collect()
    }

    pub fn optimistic_count(&self) -> usize {
        self.entities
            .values()
            .filter(|entity| entity.is_optimistic)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}
