use super::instance::Instance;
use std::collections::HashMap;

/// the set of live evaluation sessions, keyed by driver-chosen id.
/// the driving layer creates one instance per client and routes its
/// step/progress/cache commands here.
#[derive(Debug, Default)]
pub struct Registry(HashMap<String, Instance>);

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// register an instance under an id, replacing any predecessor
    pub fn set(&mut self, id: String, instance: Instance) {
        log::info!("{:<32}{:<32}", "registering instance", id);
        self.0.insert(id, instance);
    }
    pub fn get(&mut self, id: &str) -> Option<&mut Instance> {
        self.0.get_mut(id)
    }
    pub fn remove(&mut self, id: &str) -> Option<Instance> {
        log::info!("{:<32}{:<32}", "removing instance", id);
        self.0.remove(id)
    }
}
