//! Player roles and strict per-role tables

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Character archetype the player commits to at the start of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Communicator,
    TechLeader,
    ControlTower,
    Mage,
    Reporter,
}

impl Role {
    /// All roles in selection order
    pub const ALL: [Role; 5] = [
        Role::Communicator,
        Role::TechLeader,
        Role::ControlTower,
        Role::Mage,
        Role::Reporter,
    ];

    /// Stable identifier used in catalog files and asset requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Communicator => "COMMUNICATOR",
            Role::TechLeader => "TECH_LEADER",
            Role::ControlTower => "CONTROL_TOWER",
            Role::Mage => "MAGE",
            Role::Reporter => "REPORTER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// A value for every role
///
/// Deserialization fails when any role is missing, so a lookup can never
/// silently come back empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct RoleTable<T> {
    pub communicator: T,
    pub tech_leader: T,
    pub control_tower: T,
    pub mage: T,
    pub reporter: T,
}

impl<T> RoleTable<T> {
    /// Build a table by evaluating `f` for every role
    pub fn from_fn(mut f: impl FnMut(Role) -> T) -> Self {
        Self {
            communicator: f(Role::Communicator),
            tech_leader: f(Role::TechLeader),
            control_tower: f(Role::ControlTower),
            mage: f(Role::Mage),
            reporter: f(Role::Reporter),
        }
    }

    pub fn get(&self, role: Role) -> &T {
        match role {
            Role::Communicator => &self.communicator,
            Role::TechLeader => &self.tech_leader,
            Role::ControlTower => &self.control_tower,
            Role::Mage => &self.mage,
            Role::Reporter => &self.reporter,
        }
    }

    pub fn get_mut(&mut self, role: Role) -> &mut T {
        match role {
            Role::Communicator => &mut self.communicator,
            Role::TechLeader => &mut self.tech_leader,
            Role::ControlTower => &mut self.control_tower,
            Role::Mage => &mut self.mage,
            Role::Reporter => &mut self.reporter,
        }
    }

    /// Iterate over `(role, value)` pairs in selection order
    pub fn iter(&self) -> impl Iterator<Item = (Role, &T)> {
        Role::ALL.into_iter().map(move |role| (role, self.get(role)))
    }

    /// Convert every value, failing on the first error
    pub fn try_map<U, E>(self, mut f: impl FnMut(Role, T) -> Result<U, E>) -> Result<RoleTable<U>, E> {
        Ok(RoleTable {
            communicator: f(Role::Communicator, self.communicator)?,
            tech_leader: f(Role::TechLeader, self.tech_leader)?,
            control_tower: f(Role::ControlTower, self.control_tower)?,
            mage: f(Role::Mage, self.mage)?,
            reporter: f(Role::Reporter, self.reporter)?,
        })
    }
}
