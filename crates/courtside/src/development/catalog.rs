use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{AttributeCategory, Position};

/// Display metadata for one assessed attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub id: String,
    pub display_name: String,
    pub category: AttributeCategory,
}

impl AttributeDefinition {
    fn new(id: &str, display_name: &str, category: AttributeCategory) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            category,
        }
    }
}

/// Attribute id to importance weight for one position. Weights need not sum to 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionWeights(BTreeMap<String, f64>);

impl PositionWeights {
    pub fn get(&self, attribute_id: &str) -> Option<f64> {
        self.0.get(attribute_id).copied()
    }

    pub fn contains(&self, attribute_id: &str) -> bool {
        self.0.contains_key(attribute_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(id, weight)| (id.as_str(), *weight))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for PositionWeights {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, weight)| (id.into(), weight))
                .collect(),
        )
    }
}

#[derive(Debug, Clone)]
struct WeightTable {
    point_guard: PositionWeights,
    shooting_guard: PositionWeights,
    small_forward: PositionWeights,
    power_forward: PositionWeights,
    center: PositionWeights,
}

impl WeightTable {
    fn get(&self, position: Position) -> &PositionWeights {
        match position {
            Position::PG => &self.point_guard,
            Position::SG => &self.shooting_guard,
            Position::SF => &self.small_forward,
            Position::PF => &self.power_forward,
            Position::C => &self.center,
        }
    }
}

/// Read-only registry of attribute metadata and per-position weights.
///
/// Built once at startup and shared by `Arc` with the evaluator and recommendation engine.
/// Every position is guaranteed a non-empty weight table. Weighted ids without a definition are
/// tolerated; lookups fall back to the raw id and the technical category.
#[derive(Debug, Clone)]
pub struct AttributeCatalog {
    definitions: BTreeMap<String, AttributeDefinition>,
    weights: WeightTable,
}

impl AttributeCatalog {
    pub fn new(
        definitions: Vec<AttributeDefinition>,
        mut weights: BTreeMap<Position, PositionWeights>,
    ) -> Result<Self, CatalogError> {
        let mut by_id = BTreeMap::new();
        for definition in definitions {
            if by_id.contains_key(&definition.id) {
                return Err(CatalogError::DuplicateAttribute(definition.id));
            }
            by_id.insert(definition.id.clone(), definition);
        }

        let mut take = |position: Position| -> Result<PositionWeights, CatalogError> {
            let table = weights
                .remove(&position)
                .ok_or(CatalogError::MissingPosition(position))?;
            if table.is_empty() {
                return Err(CatalogError::EmptyWeights(position));
            }
            if let Some((attribute_id, weight)) = table
                .iter()
                .find(|(_, weight)| !weight.is_finite() || *weight <= 0.0)
            {
                return Err(CatalogError::InvalidWeight {
                    position,
                    attribute_id: attribute_id.to_string(),
                    weight,
                });
            }
            Ok(table)
        };

        let weights = WeightTable {
            point_guard: take(Position::PG)?,
            shooting_guard: take(Position::SG)?,
            small_forward: take(Position::SF)?,
            power_forward: take(Position::PF)?,
            center: take(Position::C)?,
        };

        Ok(Self {
            definitions: by_id,
            weights,
        })
    }

    /// Load a catalog from a JSON document of the form
    /// `{ "attributes": [...], "weights": { "PG": { "shooting": 0.8 }, ... } }`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        Self::new(document.attributes, document.weights)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn standard() -> Self {
        use AttributeCategory::{Defensive, Mental, Physical, Technical};

        let definitions = vec![
            AttributeDefinition::new("speed", "Speed", Physical),
            AttributeDefinition::new("strength", "Strength", Physical),
            AttributeDefinition::new("verticalLeap", "Vertical Leap", Physical),
            AttributeDefinition::new("stamina", "Stamina", Physical),
            AttributeDefinition::new("agility", "Agility", Physical),
            AttributeDefinition::new("shooting", "Shooting", Technical),
            AttributeDefinition::new("ballHandling", "Ball Handling", Technical),
            AttributeDefinition::new("passing", "Passing", Technical),
            AttributeDefinition::new("finishing", "Finishing", Technical),
            AttributeDefinition::new("postMoves", "Post Moves", Technical),
            AttributeDefinition::new("perimeterDefense", "Perimeter Defense", Defensive),
            AttributeDefinition::new("interiorDefense", "Interior Defense", Defensive),
            AttributeDefinition::new("rebounding", "Rebounding", Defensive),
            AttributeDefinition::new("shotBlocking", "Shot Blocking", Defensive),
            AttributeDefinition::new("stealing", "Stealing", Defensive),
            AttributeDefinition::new("basketballIQ", "Basketball IQ", Mental),
            AttributeDefinition::new("leadership", "Leadership", Mental),
            AttributeDefinition::new("composure", "Composure", Mental),
        ];

        let definitions = definitions
            .into_iter()
            .map(|definition| (definition.id.clone(), definition))
            .collect();

        let weights = WeightTable {
            point_guard: PositionWeights::from_iter([
                ("ballHandling", 1.0),
                ("passing", 0.9),
                ("basketballIQ", 0.9),
                ("shooting", 0.8),
                ("speed", 0.8),
                ("agility", 0.7),
                ("leadership", 0.7),
                ("composure", 0.6),
                ("perimeterDefense", 0.6),
                ("stealing", 0.5),
            ]),
            shooting_guard: PositionWeights::from_iter([
                ("shooting", 1.0),
                ("ballHandling", 0.7),
                ("speed", 0.7),
                ("agility", 0.7),
                ("finishing", 0.7),
                ("perimeterDefense", 0.7),
                ("composure", 0.6),
                ("basketballIQ", 0.6),
                ("passing", 0.5),
                ("stealing", 0.5),
            ]),
            small_forward: PositionWeights::from_iter([
                ("shooting", 0.8),
                ("finishing", 0.8),
                ("perimeterDefense", 0.7),
                ("agility", 0.7),
                ("basketballIQ", 0.7),
                ("verticalLeap", 0.6),
                ("rebounding", 0.6),
                ("ballHandling", 0.6),
                ("stamina", 0.6),
                ("passing", 0.5),
            ]),
            power_forward: PositionWeights::from_iter([
                ("rebounding", 0.9),
                ("strength", 0.9),
                ("interiorDefense", 0.8),
                ("postMoves", 0.8),
                ("finishing", 0.7),
                ("verticalLeap", 0.7),
                ("shotBlocking", 0.6),
                ("stamina", 0.6),
                ("basketballIQ", 0.6),
                ("shooting", 0.5),
            ]),
            center: PositionWeights::from_iter([
                ("interiorDefense", 1.0),
                ("rebounding", 1.0),
                ("shotBlocking", 0.9),
                ("strength", 0.9),
                ("postMoves", 0.8),
                ("finishing", 0.6),
                ("verticalLeap", 0.6),
                ("basketballIQ", 0.6),
                ("stamina", 0.5),
                ("composure", 0.5),
            ]),
        };

        Self {
            definitions,
            weights,
        }
    }

    pub fn definition(&self, attribute_id: &str) -> Option<&AttributeDefinition> {
        self.definitions.get(attribute_id)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.definitions.values()
    }

    pub fn weights(&self, position: Position) -> &PositionWeights {
        self.weights.get(position)
    }

    /// Display name for an attribute, or the raw id when it is not catalogued.
    pub fn display_name<'a>(&'a self, attribute_id: &'a str) -> &'a str {
        self.definition(attribute_id)
            .map(|definition| definition.display_name.as_str())
            .unwrap_or(attribute_id)
    }

    /// Category for an attribute, defaulting to technical when it is not catalogued.
    pub fn category(&self, attribute_id: &str) -> AttributeCategory {
        self.definition(attribute_id)
            .map(|definition| definition.category)
            .unwrap_or(AttributeCategory::Technical)
    }

    /// Resolve a free-form label ("Ball Handling", "ballhandling", "ball_handling") to a definition.
    pub fn resolve(&self, label: &str) -> Option<&AttributeDefinition> {
        if let Some(definition) = self.definition(label.trim()) {
            return Some(definition);
        }

        let wanted = fold_label(label);
        if wanted.is_empty() {
            return None;
        }
        self.definitions.values().find(|definition| {
            fold_label(&definition.id) == wanted || fold_label(&definition.display_name) == wanted
        })
    }

    /// Weighted attribute ids that have no definition. Empty for a well-formed catalog.
    pub fn undefined_weighted_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut missing = Vec::new();
        for position in Position::all() {
            for (attribute_id, _) in self.weights(position).iter() {
                if !self.definitions.contains_key(attribute_id) && seen.insert(attribute_id) {
                    missing.push(attribute_id.to_string());
                }
            }
        }
        missing
    }
}

fn fold_label(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    attributes: Vec<AttributeDefinition>,
    weights: BTreeMap<Position, PositionWeights>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("no weight table configured for {0}")]
    MissingPosition(Position),
    #[error("weight table for {0} is empty")]
    EmptyWeights(Position),
    #[error("weight {weight} for '{attribute_id}' at {position} must be a positive number")]
    InvalidWeight {
        position: Position,
        attribute_id: String,
        weight: f64,
    },
    #[error("attribute '{0}' is defined more than once")]
    DuplicateAttribute(String),
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),
}
