use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// In-game role. `MeleeAssassin` and `RangedAssassin` are the damage roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Tank,
    Bruiser,
    Healer,
    Support,
    MeleeAssassin,
    RangedAssassin,
}

impl Role {
    pub fn is_damage(self) -> bool {
        matches!(self, Role::MeleeAssassin | Role::RangedAssassin)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Role::Tank => "Tank",
            Role::Bruiser => "Bruiser",
            Role::Healer => "Healer",
            Role::Support => "Support",
            Role::MeleeAssassin => "Melee Assassin",
            Role::RangedAssassin => "Ranged Assassin",
        }
    }
}

/// Index into [`HERO_TABLE`]. All internal lookups key on this; raw name
/// strings are resolved exactly once, at the data-loading boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HeroId(pub u16);

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hero_name(*self))
    }
}

/// The playable roster. Single source of truth for names and roles; every
/// other table in the crate is keyed by position in this list.
pub const HERO_TABLE: &[(&str, Role)] = &[
    // Tanks
    ("Anub'arak", Role::Tank),
    ("Blaze", Role::Tank),
    ("Diablo", Role::Tank),
    ("E.T.C.", Role::Tank),
    ("Garrosh", Role::Tank),
    ("Johanna", Role::Tank),
    ("Mal'Ganis", Role::Tank),
    ("Muradin", Role::Tank),
    ("Stitches", Role::Tank),
    ("Tyrael", Role::Tank),
    // Bruisers
    ("Artanis", Role::Bruiser),
    ("Arthas", Role::Bruiser),
    ("Chen", Role::Bruiser),
    ("D.Va", Role::Bruiser),
    ("Dehaka", Role::Bruiser),
    ("Hogger", Role::Bruiser),
    ("Imperius", Role::Bruiser),
    ("Leoric", Role::Bruiser),
    ("Malthael", Role::Bruiser),
    ("Ragnaros", Role::Bruiser),
    ("Rexxar", Role::Bruiser),
    ("Sonya", Role::Bruiser),
    ("Thrall", Role::Bruiser),
    ("Varian", Role::Bruiser),
    ("Xul", Role::Bruiser),
    ("Yrel", Role::Bruiser),
    // Healers
    ("Alexstrasza", Role::Healer),
    ("Ana", Role::Healer),
    ("Anduin", Role::Healer),
    ("Auriel", Role::Healer),
    ("Brightwing", Role::Healer),
    ("Deckard", Role::Healer),
    ("Kharazim", Role::Healer),
    ("Li Li", Role::Healer),
    ("Lt. Morales", Role::Healer),
    ("Lucio", Role::Healer),
    ("Malfurion", Role::Healer),
    ("Rehgar", Role::Healer),
    ("Stukov", Role::Healer),
    ("Tyrande", Role::Healer),
    ("Uther", Role::Healer),
    ("Whitemane", Role::Healer),
    // Supports
    ("Abathur", Role::Support),
    ("Medivh", Role::Support),
    ("The Lost Vikings", Role::Support),
    ("Zarya", Role::Support),
    // Melee assassins
    ("Alarak", Role::MeleeAssassin),
    ("Illidan", Role::MeleeAssassin),
    ("Kerrigan", Role::MeleeAssassin),
    ("Maiev", Role::MeleeAssassin),
    ("Murky", Role::MeleeAssassin),
    ("Qhira", Role::MeleeAssassin),
    ("Samuro", Role::MeleeAssassin),
    ("The Butcher", Role::MeleeAssassin),
    ("Valeera", Role::MeleeAssassin),
    ("Zeratul", Role::MeleeAssassin),
    // Ranged assassins
    ("Azmodan", Role::RangedAssassin),
    ("Cassia", Role::RangedAssassin),
    ("Chromie", Role::RangedAssassin),
    ("Falstad", Role::RangedAssassin),
    ("Fenix", Role::RangedAssassin),
    ("Genji", Role::RangedAssassin),
    ("Greymane", Role::RangedAssassin),
    ("Gul'dan", Role::RangedAssassin),
    ("Hanzo", Role::RangedAssassin),
    ("Jaina", Role::RangedAssassin),
    ("Junkrat", Role::RangedAssassin),
    ("Kael'thas", Role::RangedAssassin),
    ("Kel'Thuzad", Role::RangedAssassin),
    ("Li-Ming", Role::RangedAssassin),
    ("Lunara", Role::RangedAssassin),
    ("Mephisto", Role::RangedAssassin),
    ("Nazeebo", Role::RangedAssassin),
    ("Nova", Role::RangedAssassin),
    ("Orphea", Role::RangedAssassin),
    ("Raynor", Role::RangedAssassin),
    ("Sgt. Hammer", Role::RangedAssassin),
    ("Sylvanas", Role::RangedAssassin),
    ("Tassadar", Role::RangedAssassin),
    ("Tracer", Role::RangedAssassin),
    ("Tychus", Role::RangedAssassin),
    ("Valla", Role::RangedAssassin),
    ("Zagara", Role::RangedAssassin),
    ("Zul'jin", Role::RangedAssassin),
];

pub fn hero_count() -> usize {
    HERO_TABLE.len()
}

pub fn hero_name(id: HeroId) -> &'static str {
    HERO_TABLE[id.0 as usize].0
}

pub fn hero_role(id: HeroId) -> Role {
    HERO_TABLE[id.0 as usize].1
}

pub fn all_heroes() -> impl Iterator<Item = HeroId> {
    (0..HERO_TABLE.len() as u16).map(HeroId)
}

/// Name → id interning built once over [`HERO_TABLE`].
///
/// Lookups normalize case, apostrophes and punctuation so that bundle rows
/// spelled `Kael'Thas`, `kaelthas` or `KAEL'THAS` all resolve to the same id.
pub struct HeroPool {
    by_key: HashMap<String, HeroId>,
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl HeroPool {
    pub fn new() -> Self {
        let mut by_key = HashMap::with_capacity(HERO_TABLE.len());
        for (idx, (name, _)) in HERO_TABLE.iter().enumerate() {
            by_key.insert(normalize(name), HeroId(idx as u16));
        }
        HeroPool { by_key }
    }

    pub fn id(&self, name: &str) -> Option<HeroId> {
        self.by_key.get(&normalize(name)).copied()
    }
}

impl Default for HeroPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_no_duplicate_names() {
        let pool = HeroPool::new();
        assert_eq!(pool.by_key.len(), HERO_TABLE.len());
    }

    #[test]
    fn lookup_normalizes_apostrophes_and_case() {
        let pool = HeroPool::new();
        let id = pool.id("Kael'thas").expect("in table");
        assert_eq!(pool.id("kaelthas"), Some(id));
        assert_eq!(pool.id("KAEL'THAS"), Some(id));
        assert_eq!(hero_role(id), Role::RangedAssassin);
    }

    #[test]
    fn unknown_name_is_none() {
        let pool = HeroPool::new();
        assert_eq!(pool.id("Teemo"), None);
    }

    #[test]
    fn damage_roles() {
        assert!(Role::MeleeAssassin.is_damage());
        assert!(Role::RangedAssassin.is_damage());
        assert!(!Role::Tank.is_damage());
        assert!(!Role::Healer.is_damage());
        assert!(!Role::Support.is_damage());
        assert!(!Role::Bruiser.is_damage());
    }
}
