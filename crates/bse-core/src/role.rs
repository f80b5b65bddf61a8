//! # Basis Set Roles
//!
//! Defines the computational purpose a basis set serves. A basis set is
//! either an orbital basis or one of four fitting (auxiliary) bases used to
//! approximate integrals alongside an orbital basis.
//!
//! `BasisSetRole` is the closed set accepted in `basis_set_role`.
//! `AuxiliaryRole` is the closed set of keys accepted in
//! `basis_set_auxiliaries`; every auxiliary role is also a basis set role.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BseError;

/// The role a basis set plays in a calculation.
///
/// | Role | Display name |
/// |------|--------------|
/// | `orbital` | Orbital basis |
/// | `rifit` | RI-fitting |
/// | `jkfit` | JK-fitting |
/// | `jfit` | J-fitting |
/// | `admmfit` | Auxiliary-Density Matrix Method Fitting |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasisSetRole {
    /// Primary basis for expanding molecular orbitals.
    Orbital,
    /// Resolution-of-identity fitting basis for correlation methods.
    Rifit,
    /// Combined Coulomb and exchange fitting basis.
    Jkfit,
    /// Coulomb fitting basis.
    Jfit,
    /// Auxiliary-density matrix method fitting basis.
    Admmfit,
}

impl BasisSetRole {
    /// Wire names of every role, in schema enumeration order.
    pub const NAMES: &'static [&'static str] = &["orbital", "rifit", "jkfit", "jfit", "admmfit"];

    /// Returns all roles in schema enumeration order.
    pub fn all() -> &'static [BasisSetRole] {
        &[
            Self::Orbital,
            Self::Rifit,
            Self::Jkfit,
            Self::Jfit,
            Self::Admmfit,
        ]
    }

    /// Returns the lowercase wire name, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orbital => "orbital",
            Self::Rifit => "rifit",
            Self::Jkfit => "jkfit",
            Self::Jfit => "jfit",
            Self::Admmfit => "admmfit",
        }
    }

    /// Human-readable label for listings.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Orbital => "Orbital basis",
            Self::Rifit => "RI-fitting",
            Self::Jkfit => "JK-fitting",
            Self::Jfit => "J-fitting",
            Self::Admmfit => "Auxiliary-Density Matrix Method Fitting",
        }
    }

    /// The auxiliary counterpart of this role, or `None` for `orbital`.
    pub fn as_auxiliary(&self) -> Option<AuxiliaryRole> {
        match self {
            Self::Orbital => None,
            Self::Rifit => Some(AuxiliaryRole::Rifit),
            Self::Jkfit => Some(AuxiliaryRole::Jkfit),
            Self::Jfit => Some(AuxiliaryRole::Jfit),
            Self::Admmfit => Some(AuxiliaryRole::Admmfit),
        }
    }
}

impl fmt::Display for BasisSetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BasisSetRole {
    type Err = BseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orbital" => Ok(Self::Orbital),
            "rifit" => Ok(Self::Rifit),
            "jkfit" => Ok(Self::Jkfit),
            "jfit" => Ok(Self::Jfit),
            "admmfit" => Ok(Self::Admmfit),
            other => Err(BseError::UnknownRole(other.to_string())),
        }
    }
}

/// A fitting role under which an orbital basis can name a companion basis.
///
/// Ordered as the keys appear in the metadata schema, so a
/// `BTreeMap<AuxiliaryRole, _>` serializes in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuxiliaryRole {
    /// Coulomb fitting.
    Jfit,
    /// Coulomb and exchange fitting.
    Jkfit,
    /// Resolution-of-identity fitting.
    Rifit,
    /// Auxiliary-density matrix method fitting.
    Admmfit,
}

impl AuxiliaryRole {
    /// Wire names of every auxiliary role, in schema order.
    pub const NAMES: &'static [&'static str] = &["jfit", "jkfit", "rifit", "admmfit"];

    /// Returns all auxiliary roles in schema order.
    pub fn all() -> &'static [AuxiliaryRole] {
        &[Self::Jfit, Self::Jkfit, Self::Rifit, Self::Admmfit]
    }

    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        self.as_basis_set_role().as_str()
    }

    /// The same role viewed as a basis set role.
    pub fn as_basis_set_role(&self) -> BasisSetRole {
        match self {
            Self::Jfit => BasisSetRole::Jfit,
            Self::Jkfit => BasisSetRole::Jkfit,
            Self::Rifit => BasisSetRole::Rifit,
            Self::Admmfit => BasisSetRole::Admmfit,
        }
    }
}

impl fmt::Display for AuxiliaryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuxiliaryRole {
    type Err = BseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jfit" => Ok(Self::Jfit),
            "jkfit" => Ok(Self::Jkfit),
            "rifit" => Ok(Self::Rifit),
            "admmfit" => Ok(Self::Admmfit),
            other => Err(BseError::UnknownAuxiliaryRole(other.to_string())),
        }
    }
}

impl From<AuxiliaryRole> for BasisSetRole {
    fn from(role: AuxiliaryRole) -> Self {
        role.as_basis_set_role()
    }
}

impl TryFrom<BasisSetRole> for AuxiliaryRole {
    type Error = BseError;

    fn try_from(role: BasisSetRole) -> Result<Self, Self::Error> {
        role.as_auxiliary()
            .ok_or_else(|| BseError::NotAnAuxiliaryRole(role.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_as_str() {
        let names: Vec<&str> = BasisSetRole::all().iter().map(|r| r.as_str()).collect();
        assert_eq!(names, BasisSetRole::NAMES);

        let aux: Vec<&str> = AuxiliaryRole::all().iter().map(|r| r.as_str()).collect();
        assert_eq!(aux, AuxiliaryRole::NAMES);
    }

    #[test]
    fn test_as_str_roundtrip() {
        for role in BasisSetRole::all() {
            let parsed: BasisSetRole = role.as_str().parse().unwrap();
            assert_eq!(*role, parsed);
        }
        for role in AuxiliaryRole::all() {
            let parsed: AuxiliaryRole = role.as_str().parse().unwrap();
            assert_eq!(*role, parsed);
        }
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("bogus".parse::<BasisSetRole>().is_err());
        assert!("ORBITAL".parse::<BasisSetRole>().is_err()); // case-sensitive
        assert!("".parse::<BasisSetRole>().is_err());
        assert!("orbital".parse::<AuxiliaryRole>().is_err());
    }

    #[test]
    fn test_serde_format_matches_as_str() {
        for role in BasisSetRole::all() {
            let json = serde_json::to_string(role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
        for role in AuxiliaryRole::all() {
            let json = serde_json::to_string(role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }

    #[test]
    fn test_auxiliary_conversions() {
        assert_eq!(BasisSetRole::Orbital.as_auxiliary(), None);
        assert!(AuxiliaryRole::try_from(BasisSetRole::Orbital).is_err());
        for aux in AuxiliaryRole::all() {
            let role = BasisSetRole::from(*aux);
            assert_eq!(role.as_auxiliary(), Some(*aux));
            assert_eq!(role.as_str(), aux.as_str());
        }
    }

    #[test]
    fn test_display_names_nonempty() {
        for role in BasisSetRole::all() {
            assert!(!role.display_name().is_empty());
        }
        assert_eq!(BasisSetRole::Jkfit.display_name(), "JK-fitting");
    }
}
