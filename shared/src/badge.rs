use std::fmt::{self, Display};

/// Achievement badges derived from a window of recent matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeType {
    /// Fielded the most expensive board of the lobby.
    BestDeckValue,
    /// Dealt the most damage to players in the lobby.
    MostDamage,
    /// Eliminated the most players in the lobby.
    MostEliminations,
    FirstPlace,
    TopFour,
}

impl BadgeType {
    pub const ALL: [BadgeType; 5] = [
        BadgeType::BestDeckValue,
        BadgeType::MostDamage,
        BadgeType::MostEliminations,
        BadgeType::FirstPlace,
        BadgeType::TopFour,
    ];

    /// Achievements needed within the badge window before the badge lights
    /// up. First place is special: a single win activates it.
    pub fn required_count(&self) -> u32 {
        match self {
            BadgeType::BestDeckValue => 5,
            BadgeType::MostDamage => 5,
            BadgeType::MostEliminations => 5,
            BadgeType::FirstPlace => 1,
            BadgeType::TopFour => 10,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeType::BestDeckValue => "BEST_DECK_VALUE",
            BadgeType::MostDamage => "MOST_DAMAGE",
            BadgeType::MostEliminations => "MOST_ELIMINATIONS",
            BadgeType::FirstPlace => "FIRST_PLACE",
            BadgeType::TopFour => "TOP_FOUR",
        }
    }
}

impl Display for BadgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Badge progress computed over a match window. Not persisted on its own;
/// it only exists relative to the window it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub badge_type: BadgeType,
    pub current_count: u32,
    pub required_count: u32,
    pub is_active: bool,
}

impl Badge {
    pub fn new(badge_type: BadgeType, current_count: u32) -> Self {
        let required_count = badge_type.required_count();
        Self {
            badge_type,
            current_count,
            required_count,
            is_active: current_count >= required_count,
        }
    }
}
