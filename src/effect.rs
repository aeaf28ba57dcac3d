use crate::generation::Generation;
use crate::state::Entity;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadList {
        limit: usize,
        offset: usize,
    },
    ComputeTypeCounts {
        generation: Generation,
        favorites: Vec<Entity>,
    },
    LoadDetail {
        generation: Generation,
        name: String,
        force: bool,
    },
}
