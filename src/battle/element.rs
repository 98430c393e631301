/// elemental typing of units and moves, with the classic
/// rock-paper-scissors-style effectiveness wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Rock,
}

impl Element {
    /// damage multiplier of an attack of this element against a single
    /// defending element. pairs not listed are neutral (1.0).
    pub fn multiplier(self, defend: Element) -> f64 {
        use Element::*;
        match (self, defend) {
            (Normal, Rock) => 0.5,
            (Fire, Fire) | (Fire, Water) | (Fire, Rock) => 0.5,
            (Fire, Grass) | (Fire, Ice) => 2.0,
            (Water, Fire) | (Water, Ground) | (Water, Rock) => 2.0,
            (Water, Water) | (Water, Grass) => 0.5,
            (Electric, Water) | (Electric, Flying) => 2.0,
            (Electric, Electric) | (Electric, Grass) => 0.5,
            (Electric, Ground) => 0.0,
            (Grass, Water) | (Grass, Ground) | (Grass, Rock) => 2.0,
            (Grass, Fire) | (Grass, Grass) | (Grass, Poison) | (Grass, Flying) => 0.5,
            (Ice, Grass) | (Ice, Ground) | (Ice, Flying) => 2.0,
            (Ice, Water) | (Ice, Ice) => 0.5,
            (Fighting, Normal) | (Fighting, Ice) | (Fighting, Rock) => 2.0,
            (Fighting, Poison) | (Fighting, Flying) | (Fighting, Psychic) => 0.5,
            (Poison, Grass) => 2.0,
            (Poison, Poison) | (Poison, Ground) | (Poison, Rock) => 0.5,
            (Ground, Fire) | (Ground, Electric) | (Ground, Poison) | (Ground, Rock) => 2.0,
            (Ground, Grass) => 0.5,
            (Ground, Flying) => 0.0,
            (Flying, Grass) | (Flying, Fighting) => 2.0,
            (Flying, Electric) | (Flying, Rock) => 0.5,
            (Psychic, Fighting) | (Psychic, Poison) => 2.0,
            (Psychic, Psychic) => 0.5,
            (Rock, Fire) | (Rock, Ice) | (Rock, Flying) => 2.0,
            (Rock, Fighting) | (Rock, Ground) => 0.5,
            _ => 1.0,
        }
    }

    /// combined multiplier against a dual-element defender
    pub fn against(self, defend: &[Element]) -> f64 {
        defend.iter().map(|d| self.multiplier(*d)).product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_is_asymmetric() {
        assert_eq!(Element::Fire.multiplier(Element::Grass), 2.0);
        assert_eq!(Element::Grass.multiplier(Element::Fire), 0.5);
        assert_eq!(Element::Electric.multiplier(Element::Ground), 0.0);
        assert_eq!(Element::Normal.multiplier(Element::Normal), 1.0);
    }

    #[test]
    fn dual_defense_compounds() {
        let defend = [Element::Grass, Element::Poison];
        assert_eq!(Element::Fire.against(&defend), 2.0);
        assert_eq!(Element::Grass.against(&defend), 0.25);
    }
}
