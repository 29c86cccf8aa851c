//! Rule vocabulary for resource tables.

use crate::astro::{AtmosphereType, LifeType};
use crate::stellar::Temperature;

/// How a rule's density is produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    /// `base + dice`d`sides`.
    Roll { base: i32, dice: u32, sides: u32 },
    /// The planet's hydrographics percentage.
    Hydrographics,
    /// `base` scaled by the atmosphere's pressure.
    PressureScaled(i32),
}

/// When a rule applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    Always,
    /// On a 1 on a die of this size.
    OneIn(u32),
    AtmosphereIs(AtmosphereType),
    AtmosphereIsNot(AtmosphereType),
    /// Hydrographics at or above this percentage.
    MinHydrographics(u32),
    LifeAtLeast(LifeType),
    /// Orbit temperature at this band or colder.
    NoWarmerThan(Temperature),
}

/// One line of a resource table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub resource: &'static str,
    pub amount: Amount,
    pub condition: Condition,
}

/// A table entry: either a single rule, or a roll that selects one of
/// several groups of entries.
#[derive(Debug, Clone, Copy)]
pub enum Entry {
    Add(Rule),
    /// Rolls `dice`d`sides` and applies the first branch whose inclusive
    /// range holds the result.
    Pick {
        dice: u32,
        sides: u32,
        branches: &'static [Branch],
    },
}

/// One outcome of an [`Entry::Pick`].
#[derive(Debug, Clone, Copy)]
pub struct Branch {
    pub low: i32,
    pub high: i32,
    pub entries: &'static [Entry],
}

/// Unconditional `base + dice`d`sides`.
pub const fn roll(resource: &'static str, base: i32, dice: u32, sides: u32) -> Entry {
    Entry::Add(Rule {
        resource,
        amount: Amount::Roll { base, dice, sides },
        condition: Condition::Always,
    })
}

/// `base + dice`d`sides` on a 1 in `n`.
pub const fn one_in(n: u32, resource: &'static str, base: i32, dice: u32, sides: u32) -> Entry {
    Entry::Add(Rule {
        resource,
        amount: Amount::Roll { base, dice, sides },
        condition: Condition::OneIn(n),
    })
}

/// A rule with an explicit amount and condition.
pub const fn rule(resource: &'static str, amount: Amount, condition: Condition) -> Entry {
    Entry::Add(Rule {
        resource,
        amount,
        condition,
    })
}

/// A branch covering results `low..=high`.
pub const fn branch(low: i32, high: i32, entries: &'static [Entry]) -> Branch {
    Branch { low, high, entries }
}
