//! Game configuration
//!
//! Everything the engine needs at construction: the recipe table, the starter
//! items, where new items may appear and how many discoveries win the game.
//! Configs are TOML by default; files ending in `.json` are read as JSON.

use std::fs;
use std::path::Path;

use fusion_core::{ItemKind, SpawnArea};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::discovery::TOTAL_DISCOVERIES;
use crate::error::ConfigError;
use crate::recipe::{Recipe, RecipeBook};

/// The food set shipped with the game.
const BUILTIN_RECIPES: &str = include_str!("../../../data/recipes.toml");

/// Construction-time settings for a [`CombinationEngine`](crate::CombinationEngine)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Unique discoveries needed to win
    pub victory_threshold: usize,
    /// Kinds spawned (and counted as discovered) at start and on every reset
    pub starter_items: Vec<ItemKind>,
    /// Region random spawn positions are drawn from
    pub spawn_area: SpawnArea,
    /// Seed for spawn positions; `None` draws one from the OS
    pub seed: Option<u64>,
    /// Recipe table, in priority order
    pub recipes: Vec<Recipe>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            victory_threshold: TOTAL_DISCOVERIES,
            starter_items: ["Bread", "Cheese", "Egg", "Rice", "Chicken"]
                .into_iter()
                .map(ItemKind::from)
                .collect(),
            spawn_area: SpawnArea::default(),
            seed: None,
            recipes: Vec::new(),
        }
    }
}

impl GameConfig {
    /// The built-in food set
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_RECIPES)
    }

    /// Parse and validate a TOML config
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, picking the format from its extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        info!(
            "Loaded {} recipes and {} starters from {:?}",
            config.recipes.len(),
            config.starter_items.len(),
            path
        );
        Ok(config)
    }

    /// Replace the recipe table
    pub fn with_recipes(mut self, recipes: Vec<Recipe>) -> Self {
        self.recipes = recipes;
        self
    }

    /// Replace the starter set
    pub fn with_starters<I, K>(mut self, starters: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ItemKind>,
    {
        self.starter_items = starters.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.victory_threshold = threshold;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_spawn_area(mut self, spawn_area: SpawnArea) -> Self {
        self.spawn_area = spawn_area;
        self
    }

    /// Check the config for values the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.victory_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if !self.spawn_area.is_well_formed() {
            return Err(ConfigError::InvalidSpawnArea {
                min: self.spawn_area.min,
                max: self.spawn_area.max,
            });
        }
        if let Some(pos) = self.starter_items.iter().position(ItemKind::is_blank) {
            return Err(ConfigError::EmptyName(format!("starter item #{}", pos + 1)));
        }
        for (i, recipe) in self.recipes.iter().enumerate() {
            if recipe.a.is_blank() || recipe.b.is_blank() || recipe.result.is_blank() {
                return Err(ConfigError::EmptyName(format!("recipe #{}", i + 1)));
            }
        }
        Ok(())
    }

    /// Build the immutable recipe registry
    pub fn recipe_book(&self) -> RecipeBook {
        RecipeBook::new(self.recipes.clone())
    }
}
