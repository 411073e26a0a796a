//! Dinosaur expectation values and their ranking semantics.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Dinosaur gender as the server encodes it.
///
/// `Invalid` is deliberately constructible: stories submit it to drive
/// the server's gender validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
    #[serde(rename = "INVALID")]
    Invalid,
}

/// The ten supported species, plus an invalid sentinel for validation
/// stories. Wire encoding is the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Species {
    Ankylosaurus,
    Brachiosaurus,
    Diplodocus,
    Stegosaurus,
    Triceratops,
    Allosaurus,
    Megalosaurus,
    Spinosaurus,
    #[serde(rename = "Tyrannosaurus Rex")]
    TyrannosaurusRex,
    Velociraptor,
    #[serde(rename = "INVALID")]
    Invalid,
}

impl Species {
    /// True for the five meat-eating species.
    pub fn is_carnivorous(&self) -> bool {
        matches!(
            self,
            Species::Allosaurus
                | Species::Megalosaurus
                | Species::Spinosaurus
                | Species::TyrannosaurusRex
                | Species::Velociraptor
        )
    }
}

/// An expected dinosaur, compared against server payloads field for field.
///
/// Equality is identity over the wire fields. Ranking is a separate
/// operation: [`Dinosaur::force_cmp`] orders by derived force alone, so
/// two differently named dinosaurs can rank equal while still comparing
/// unequal as values. There is intentionally no `Ord` impl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dinosaur {
    /// Unique name within a run
    pub name: String,
    /// Body weight; negative values are constructible so stories can
    /// exercise the server's weight validation
    pub weight: i64,
    /// Wire code "m" or "f", or the invalid sentinel
    pub gender: Gender,
    /// Display-name encoded species
    pub species: Species,
}

impl Dinosaur {
    /// Creates a dinosaur expectation.
    pub fn new(name: impl Into<String>, weight: i64, gender: Gender, species: Species) -> Self {
        Self {
            name: name.into(),
            weight,
            gender,
            species,
        }
    }

    /// Derived ranking force: weight, half again for females, half again
    /// for carnivores.
    pub fn force(&self) -> f64 {
        let gender_factor = if self.gender == Gender::Female { 1.5 } else { 1.0 };
        let diet_factor = if self.species.is_carnivorous() { 1.5 } else { 1.0 };
        self.weight as f64 * gender_factor * diet_factor
    }

    /// Totally orders by force; ties compare equal regardless of the
    /// other fields.
    pub fn force_cmp(&self, other: &Dinosaur) -> Ordering {
        self.force().total_cmp(&other.force())
    }
}

/// Sorts strongest first, the order the server reports its ranking in.
pub fn ranked_by_force(mut dinosaurs: Vec<Dinosaur>) -> Vec<Dinosaur> {
    dinosaurs.sort_by(|a, b| b.force_cmp(a));
    dinosaurs
}
