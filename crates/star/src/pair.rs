use crate::event::StarId;
use crate::star::Star;

/// The two stars of a simulation. Owned by the simulation context; other
/// components address them by [`StarId`].
#[derive(Debug, Clone, PartialEq)]
pub struct StarPair {
    pub primary: Star,
    pub secondary: Star,
}

impl StarPair {
    pub fn new(primary_mass: f64, secondary_mass: f64) -> Self {
        Self {
            primary: Star::new(primary_mass),
            secondary: Star::new(secondary_mass),
        }
    }

    pub fn get(&self, id: StarId) -> &Star {
        match id {
            StarId::Primary => &self.primary,
            StarId::Secondary => &self.secondary,
        }
    }

    pub fn get_mut(&mut self, id: StarId) -> &mut Star {
        match id {
            StarId::Primary => &mut self.primary,
            StarId::Secondary => &mut self.secondary,
        }
    }

    /// Borrow `id` and its companion mutably at the same time.
    pub fn split_mut(&mut self, id: StarId) -> (&mut Star, &mut Star) {
        match id {
            StarId::Primary => (&mut self.primary, &mut self.secondary),
            StarId::Secondary => (&mut self.secondary, &mut self.primary),
        }
    }

    /// Replace a star with a fresh one of the given initial mass.
    pub fn reset(&mut self, id: StarId, initial_mass: f64) {
        *self.get_mut(id) = Star::new(initial_mass);
    }
}
